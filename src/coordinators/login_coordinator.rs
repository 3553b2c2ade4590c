use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::app_data::AppData;
use crate::config::database::{begin_transaction, commit_transaction};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::{AuthenticationProvider, PasswordProvider, TokenProvider, ValidationProvider};
use crate::stores::CredentialStore;
use crate::types::db::ActiveStatus;
use crate::types::dto::auth::{
    ChangePasswordRequest, LoginRequest, LogoutRequest, RecoverUsernameRequest, RecoverUsernameResponse,
    RefreshRequest, RefreshResponse, TokenResponse, WhoAmIResponse,
};
use crate::types::internal::context::RequestContext;

const TOKEN_TYPE: &str = "Bearer";

/// Authentication coordinator that orchestrates login, token refresh, logout
/// and self-service credential workflows
pub struct LoginCoordinator {
    db: DatabaseConnection,
    credential_store: Arc<CredentialStore>,
    token_provider: Arc<TokenProvider>,
    password_provider: Arc<PasswordProvider>,
    validation_provider: Arc<ValidationProvider>,
    authentication_provider: Arc<AuthenticationProvider>,
}

impl LoginCoordinator {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            db: app_data.db.clone(),
            credential_store: app_data.stores.credential_store.clone(),
            token_provider: app_data.providers.token_provider.clone(),
            password_provider: app_data.providers.password_provider.clone(),
            validation_provider: app_data.providers.validation_provider.clone(),
            authentication_provider: Arc::clone(&app_data.providers.authentication_provider),
        }
    }

    /// Orchestrate a complete login workflow
    ///
    /// Coordinates the sequence of operations:
    /// 1. Look up the credential by username
    /// 2. Verify the password
    /// 3. Reject inactive accounts
    /// 4. Load roles and expand them through the hierarchy
    /// 5. Issue the access token and a refresh token
    /// 6. Store the refresh token digest and record the login
    ///
    /// Unknown usernames and wrong passwords both answer `InvalidCredentials`.
    pub async fn login(&self, ctx: &RequestContext, request: LoginRequest) -> Result<TokenResponse, InternalError> {
        let credential = self
            .credential_store
            .find_by_username(&self.db, request.username.trim())
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;

        let verified = self
            .password_provider
            .verify_password(&credential.password_hash, &request.password)
            .await?;
        if !verified {
            tracing::info!(username = %credential.username, ip = ?ctx.ip_address, "Login failed");
            return Err(CredentialError::InvalidCredentials.into());
        }

        if credential.status != ActiveStatus::Active {
            return Err(CredentialError::AccountInactive(credential.user_id).into());
        }

        let roles = self.credential_store.roles(&self.db, credential.ref_id).await?;
        let principal = self.authentication_provider.principal_for(&credential, &roles);

        let issued = self.token_provider.generate_jwt(
            &credential.user_id,
            &credential.username,
            principal.account_kind,
            roles.clone(),
        )?;
        let refresh_token = self.token_provider.generate_refresh_token();
        let token_hash = self.token_provider.hash_refresh_token(&refresh_token)?;

        let txn = begin_transaction(&self.db, "login").await?;
        self.credential_store
            .store_refresh_token(&txn, token_hash, credential.ref_id, self.token_provider.refresh_expiration())
            .await?;
        self.credential_store.record_login(&txn, credential.ref_id).await?;
        commit_transaction(txn, "login").await?;

        tracing::info!(user_id = %credential.user_id, ip = ?ctx.ip_address, "Login succeeded");

        Ok(TokenResponse {
            access_token: issued.token,
            refresh_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.token_provider.access_token_seconds(),
            user_id: credential.user_id,
            roles,
            authorities: principal.authorities.into_iter().collect(),
        })
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh(&self, ctx: &RequestContext, request: RefreshRequest) -> Result<RefreshResponse, InternalError> {
        let token_hash = self.token_provider.hash_refresh_token(&request.refresh_token)?;
        let stored = self.credential_store.validate_refresh_token(&self.db, &token_hash).await?;

        let credential = self
            .credential_store
            .find_by_ref_id(&self.db, stored.user_ref_id)
            .await?
            .ok_or_else(|| CredentialError::invalid_token("refresh_token", "credential no longer exists"))?;
        if credential.status != ActiveStatus::Active {
            return Err(CredentialError::AccountInactive(credential.user_id).into());
        }

        let roles = self.credential_store.roles(&self.db, credential.ref_id).await?;
        let issued = self.token_provider.generate_jwt(
            &credential.user_id,
            &credential.username,
            credential.account_type.into(),
            roles,
        )?;

        tracing::debug!(user_id = %credential.user_id, request_id = %ctx.request_id, "Access token refreshed");

        Ok(RefreshResponse {
            access_token: issued.token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: self.token_provider.access_token_seconds(),
        })
    }

    /// Revoke one of the caller's refresh tokens
    pub async fn logout(&self, ctx: &RequestContext, request: LogoutRequest) -> Result<(), InternalError> {
        let principal = ctx.require_principal()?;
        let token_hash = self.token_provider.hash_refresh_token(&request.refresh_token)?;

        self.credential_store
            .revoke_refresh_token(&self.db, &token_hash, principal.user_ref_id)
            .await?;

        tracing::info!(user_id = %principal.user_id, "Logged out");
        Ok(())
    }

    pub fn whoami(&self, ctx: &RequestContext) -> Result<WhoAmIResponse, InternalError> {
        let principal = ctx.require_principal()?;

        Ok(WhoAmIResponse {
            user_id: principal.user_id.clone(),
            username: principal.username.clone(),
            account_type: principal.account_kind.into(),
            roles: principal.roles.iter().map(|r| r.authority().to_string()).collect(),
            authorities: principal.authorities.iter().cloned().collect(),
        })
    }

    /// Username of the account whose email and phone both match
    pub async fn recover_username(
        &self,
        ctx: &RequestContext,
        request: RecoverUsernameRequest,
    ) -> Result<RecoverUsernameResponse, InternalError> {
        let (email, phone) = self.validation_provider.username_recovery(&request)?;

        let credential = self
            .credential_store
            .find_by_contact(&self.db, &email, &phone)
            .await?
            .ok_or(CredentialError::RecoveryNotMatched)?;

        tracing::info!(user_id = %credential.user_id, ip = ?ctx.ip_address, "Username recovered");
        Ok(RecoverUsernameResponse {
            username: credential.username,
        })
    }

    /// Replace the caller's password and revoke all of its refresh tokens
    pub async fn change_password(&self, ctx: &RequestContext, request: ChangePasswordRequest) -> Result<(), InternalError> {
        let principal = ctx.require_principal()?;
        let new_password = self.validation_provider.password_change(&request)?;

        let credential = self
            .credential_store
            .find_by_ref_id(&self.db, principal.user_ref_id)
            .await?
            .ok_or_else(|| CredentialError::CredentialNotFound(principal.user_id.clone()))?;

        let verified = self
            .password_provider
            .verify_password(&credential.password_hash, &request.current_password)
            .await?;
        if !verified {
            return Err(CredentialError::IncorrectPassword.into());
        }

        let password_hash = self.password_provider.hash_password(&new_password).await?;

        let txn = begin_transaction(&self.db, "change_password").await?;
        self.credential_store
            .update_password_hash(&txn, credential.ref_id, password_hash)
            .await?;
        let revoked = self
            .credential_store
            .revoke_all_refresh_tokens(&txn, credential.ref_id)
            .await?;
        commit_transaction(txn, "change_password").await?;

        tracing::info!(user_id = %credential.user_id, revoked, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinators::CustomerCoordinator;
    use crate::test::utils::{TEST_PASSWORD, context_for, customer_form, setup_test_app_data};

    async fn registered_customer(app_data: &Arc<AppData>) -> String {
        CustomerCoordinator::new(app_data.clone())
            .register(&RequestContext::for_system("test"), customer_form(20))
            .await
            .unwrap()
            .customer_id()
    }

    fn login_request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_tokens_and_records_login() {
        let app_data = setup_test_app_data().await;
        let user_id = registered_customer(&app_data).await;
        let coordinator = LoginCoordinator::new(app_data.clone());
        let ctx = RequestContext::for_system("test");

        let response = coordinator
            .login(&ctx, login_request("customer20", TEST_PASSWORD))
            .await
            .unwrap();

        assert_eq!(response.user_id, user_id);
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.roles, vec!["ROLE_CUSTOMER".to_string()]);
        assert_eq!(response.refresh_token.len(), 44);

        let credential = app_data
            .stores
            .credential_store
            .find_by_user_id(&app_data.db, &user_id)
            .await
            .unwrap()
            .unwrap();
        assert!(credential.last_login_at.is_some());

        let refreshed = coordinator
            .refresh(
                &ctx,
                RefreshRequest {
                    refresh_token: response.refresh_token,
                },
            )
            .await
            .unwrap();
        assert!(!refreshed.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let app_data = setup_test_app_data().await;
        registered_customer(&app_data).await;
        let coordinator = LoginCoordinator::new(app_data.clone());
        let ctx = RequestContext::for_system("test");

        for request in [login_request("customer20", "wrong-pass1"), login_request("nobody", TEST_PASSWORD)] {
            assert!(matches!(
                coordinator.login(&ctx, request).await,
                Err(InternalError::Credential(CredentialError::InvalidCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn test_recover_username_needs_both_values() {
        let app_data = setup_test_app_data().await;
        registered_customer(&app_data).await;
        let coordinator = LoginCoordinator::new(app_data.clone());
        let ctx = RequestContext::for_system("test");

        let recovered = coordinator
            .recover_username(
                &ctx,
                RecoverUsernameRequest {
                    email: "Customer20@example.com".to_string(),
                    phone: "9845000020".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(recovered.username, "customer20");

        assert!(matches!(
            coordinator
                .recover_username(
                    &ctx,
                    RecoverUsernameRequest {
                        email: "customer20@example.com".to_string(),
                        phone: "9845000099".to_string(),
                    },
                )
                .await,
            Err(InternalError::Credential(CredentialError::RecoveryNotMatched))
        ));
    }

    #[tokio::test]
    async fn test_change_password_revokes_refresh_tokens() {
        let app_data = setup_test_app_data().await;
        let user_id = registered_customer(&app_data).await;
        let coordinator = LoginCoordinator::new(app_data.clone());
        let system = RequestContext::for_system("test");
        let tokens = coordinator
            .login(&system, login_request("customer20", TEST_PASSWORD))
            .await
            .unwrap();
        let ctx = context_for(&app_data, &user_id).await;

        let wrong_current = ChangePasswordRequest {
            current_password: "not-my-pass1".to_string(),
            new_password: "newfrost2025".to_string(),
            confirm_password: "newfrost2025".to_string(),
        };
        assert!(matches!(
            coordinator.change_password(&ctx, wrong_current).await,
            Err(InternalError::Credential(CredentialError::IncorrectPassword))
        ));

        coordinator
            .change_password(
                &ctx,
                ChangePasswordRequest {
                    current_password: TEST_PASSWORD.to_string(),
                    new_password: "newfrost2025".to_string(),
                    confirm_password: "newfrost2025".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            coordinator
                .refresh(
                    &system,
                    RefreshRequest {
                        refresh_token: tokens.refresh_token,
                    },
                )
                .await,
            Err(InternalError::Credential(CredentialError::InvalidToken { .. }))
        ));
        assert!(coordinator.login(&system, login_request("customer20", "newfrost2025")).await.is_ok());
    }
}
