// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::{ApplicationSettings, SecretManager};
use crate::types::dto::customer::RegisterCustomerRequest;
use crate::types::dto::employee::RegisterEmployeeRequest;
use crate::types::dto::owner::RegisterOwnerRequest;
use crate::types::internal::context::RequestContext;

pub const TEST_PASSWORD: &str = "frost2024cool";

/// In-memory SQLite database with every migration applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    Arc::new(SecretManager::from_values(
        "test-secret-key-minimum-32-characters-long",
        "test-refresh-secret-minimum-32-chars",
        "test-pepper-for-unit-tests",
    ))
}

/// Fully wired AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(
        AppData::new(db, ApplicationSettings::default(), test_secret_manager())
            .expect("Failed to build test AppData"),
    )
}

/// Ten-digit local phone number unique per `n`
fn phone(n: u32) -> String {
    format!("98450{:05}", n)
}

fn national_id(n: u32) -> String {
    format!("5000{:08}", n)
}

pub fn owner_form(n: u32) -> RegisterOwnerRequest {
    RegisterOwnerRequest {
        first_name: "Meera".to_string(),
        last_name: "Iyer".to_string(),
        email: format!("owner{}@frostcare.in", n),
        phone: phone(n),
        national_id: national_id(n),
        address: "14 Residency Road, Bengaluru".to_string(),
        username: format!("owner{}", n),
        password: TEST_PASSWORD.to_string(),
        confirm_password: TEST_PASSWORD.to_string(),
    }
}

pub fn employee_form(n: u32) -> RegisterEmployeeRequest {
    RegisterEmployeeRequest {
        first_name: "Ravi".to_string(),
        last_name: "Kumar".to_string(),
        email: format!("tech{}@frostcare.in", n),
        phone: phone(n),
        national_id: national_id(n),
        address: "7 Hosur Road, Bengaluru".to_string(),
        designation: "Technician".to_string(),
        username: format!("tech{}", n),
        password: TEST_PASSWORD.to_string(),
        confirm_password: TEST_PASSWORD.to_string(),
    }
}

pub fn customer_form(n: u32) -> RegisterCustomerRequest {
    RegisterCustomerRequest {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: format!("customer{}@example.com", n),
        phone: phone(n),
        address: "221 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        pincode: "560001".to_string(),
        username: format!("customer{}", n),
        password: TEST_PASSWORD.to_string(),
        confirm_password: TEST_PASSWORD.to_string(),
    }
}

/// Context authenticated as the credential of `user_id`, roles loaded from the database
pub async fn context_for(app_data: &AppData, user_id: &str) -> RequestContext {
    let credential = app_data
        .stores
        .credential_store
        .find_by_user_id(&app_data.db, user_id)
        .await
        .expect("Failed to load credential")
        .expect("Credential exists");
    let roles = app_data
        .stores
        .credential_store
        .roles(&app_data.db, credential.ref_id)
        .await
        .expect("Failed to load roles");
    let principal = app_data
        .providers
        .authentication_provider
        .principal_for(&credential, &roles);

    RequestContext::for_cli("test").with_principal(principal)
}
