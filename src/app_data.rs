use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{ApplicationError, ApplicationSettings, SecretManager};
use crate::providers::{
    AuthenticationProvider, CryptoProvider, PasswordProvider, TokenProvider, UniquenessProvider, ValidationProvider,
};
use crate::stores::{CatalogStore, ComplaintStore, CredentialStore, CustomerStore, EmployeeStore, OwnerStore};
use crate::types::internal::role_hierarchy::RoleHierarchy;

/// Stores shared by every coordinator
pub struct Stores {
    pub owner_store: Arc<OwnerStore>,
    pub employee_store: Arc<EmployeeStore>,
    pub customer_store: Arc<CustomerStore>,
    pub credential_store: Arc<CredentialStore>,
    pub catalog_store: Arc<CatalogStore>,
    pub complaint_store: Arc<ComplaintStore>,
}

/// Providers shared by every coordinator
pub struct Providers {
    pub crypto_provider: Arc<CryptoProvider>,
    pub password_provider: Arc<PasswordProvider>,
    pub token_provider: Arc<TokenProvider>,
    pub validation_provider: Arc<ValidationProvider>,
    pub uniqueness_provider: Arc<UniquenessProvider>,
    pub authentication_provider: Arc<AuthenticationProvider>,
}

/// Centralized application data following the main-owned stores pattern
///
/// All dependencies are created once in main.rs and shared across coordinators.
///
/// # Architecture
///
/// ```text
/// main.rs
///   ↓
/// AppData::new(db, settings, secret_manager)
///   ↓ creates once
///   ├─ role_hierarchy (parsed from settings)
///   ├─ stores (owner, employee, customer, credential, catalog, complaint)
///   └─ providers (crypto, password, token, validation, uniqueness, authentication)
///   ↓ wrapped in Arc<AppData>
///   ↓ passed to coordinators
///   ├─ LoginCoordinator::new(app_data)
///   ├─ OwnerCoordinator::new(app_data)
///   ├─ EmployeeCoordinator::new(app_data)
///   ├─ CustomerCoordinator::new(app_data)
///   └─ ComplaintCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: Arc<ApplicationSettings>,
    pub secret_manager: Arc<SecretManager>,
    pub role_hierarchy: Arc<RoleHierarchy>,
    pub stores: Stores,
    pub providers: Providers,
}

impl AppData {
    /// Wire stores and providers around an already migrated database
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidRoleHierarchy` when the configured
    /// hierarchy rules do not parse.
    pub fn new(
        db: DatabaseConnection,
        settings: ApplicationSettings,
        secret_manager: Arc<SecretManager>,
    ) -> Result<Self, ApplicationError> {
        tracing::info!("Initializing AppData...");

        let role_hierarchy = Arc::new(settings.parsed_role_hierarchy()?);

        tracing::debug!("Creating stores...");
        let stores = Stores {
            owner_store: Arc::new(OwnerStore::new()),
            employee_store: Arc::new(EmployeeStore::new()),
            customer_store: Arc::new(CustomerStore::new()),
            credential_store: Arc::new(CredentialStore::new()),
            catalog_store: Arc::new(CatalogStore::new()),
            complaint_store: Arc::new(ComplaintStore::new()),
        };

        tracing::debug!("Creating providers...");
        let crypto_provider = Arc::new(CryptoProvider::new());
        let token_provider = Arc::new(TokenProvider::new(
            secret_manager.clone(),
            crypto_provider.clone(),
            &settings,
        ));
        let authentication_provider = Arc::new(AuthenticationProvider::new(
            token_provider.clone(),
            stores.credential_store.clone(),
            role_hierarchy.clone(),
        ));
        let providers = Providers {
            password_provider: Arc::new(PasswordProvider::new(secret_manager.clone())),
            validation_provider: Arc::new(ValidationProvider::new(settings.country_code.clone())),
            uniqueness_provider: Arc::new(UniquenessProvider::new()),
            crypto_provider,
            token_provider,
            authentication_provider,
        };

        tracing::info!("AppData initialization complete");

        Ok(Self {
            db,
            settings: Arc::new(settings),
            secret_manager,
            role_hierarchy,
            stores,
            providers,
        })
    }
}
