use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::token_provider::TokenProvider;
use crate::stores::CredentialStore;
use crate::types::db::{ActiveStatus, user_credential};
use crate::types::internal::auth::{Principal, Role};
use crate::types::internal::role_hierarchy::RoleHierarchy;

/// Resolves bearer tokens into principals with hierarchy-expanded authorities
pub struct AuthenticationProvider {
    token_provider: Arc<TokenProvider>,
    credential_store: Arc<CredentialStore>,
    role_hierarchy: Arc<RoleHierarchy>,
}

impl AuthenticationProvider {
    pub fn new(
        token_provider: Arc<TokenProvider>,
        credential_store: Arc<CredentialStore>,
        role_hierarchy: Arc<RoleHierarchy>,
    ) -> Self {
        Self {
            token_provider,
            credential_store,
            role_hierarchy,
        }
    }

    /// Validate an access token and load the caller it names
    ///
    /// Roles are read from the database rather than trusted from the token,
    /// so revoked grants and deactivated accounts take effect immediately.
    pub async fn authenticate(&self, conn: &impl ConnectionTrait, token: &str) -> Result<Principal, InternalError> {
        let claims = self.token_provider.validate_jwt(token)?;

        let credential = self
            .credential_store
            .find_by_user_id(conn, &claims.sub)
            .await?
            .ok_or_else(|| CredentialError::invalid_token("jwt", "subject no longer exists"))?;

        if credential.status != ActiveStatus::Active {
            tracing::debug!(user_id = %credential.user_id, "Rejected token for inactive account");
            return Err(CredentialError::invalid_token("jwt", "account is inactive").into());
        }

        let roles = self.credential_store.roles(conn, credential.ref_id).await?;
        Ok(self.principal_for(&credential, &roles))
    }

    /// Build the principal for a credential and its directly granted roles
    pub fn principal_for(&self, credential: &user_credential::Model, granted: &[String]) -> Principal {
        let authorities = self
            .role_hierarchy
            .reachable_authorities(granted.iter().map(String::as_str));

        Principal {
            user_ref_id: credential.ref_id,
            user_id: credential.user_id.clone(),
            username: credential.username.clone(),
            account_kind: credential.account_type.into(),
            roles: granted.iter().filter_map(|r| Role::from_authority(r)).collect(),
            authorities,
        }
    }
}
