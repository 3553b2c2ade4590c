use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, SecurityScheme, Tags, auth::Bearer, payload::Json};

use crate::api::helpers;
use crate::app_data::AppData;
use crate::coordinators::LoginCoordinator;
use crate::errors::AuthError;
use crate::types::dto::auth::{
    ChangePasswordPayload, LoginPayload, LogoutRequest, RecoverUsernamePayload, RecoverUsernameResponse,
    RefreshRequest, RefreshResponse, TokenResponse, WhoAmIResponse,
};
use crate::types::dto::common::MessageResponse;
use crate::types::internal::context::RequestContext;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(ty = "bearer", key_name = "Authorization", key_in = "header", bearer_format = "JWT")]
pub struct BearerAuth(pub Bearer);

/// API tags for authentication endpoints
#[derive(Tags)]
enum AuthTags {
    /// Authentication endpoints
    Authentication,
}

/// Authentication API endpoints
pub struct AuthApi {
    app_data: Arc<AppData>,
    login_coordinator: LoginCoordinator,
}

impl AuthApi {
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            login_coordinator: LoginCoordinator::new(app_data.clone()),
            app_data,
        }
    }
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Login with username and password to receive authentication tokens
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, req: &Request, body: LoginPayload) -> Result<Json<TokenResponse>, AuthError> {
        let ctx = RequestContext::for_api(req);
        let tokens = self.login_coordinator.login(&ctx, body.into_inner()).await?;
        Ok(Json(tokens))
    }

    /// Exchange a refresh token for a new access token
    #[oai(path = "/refresh", method = "post", tag = "AuthTags::Authentication")]
    async fn refresh(&self, req: &Request, body: Json<RefreshRequest>) -> Result<Json<RefreshResponse>, AuthError> {
        let ctx = RequestContext::for_api(req);
        let refreshed = self.login_coordinator.refresh(&ctx, body.0).await?;
        Ok(Json(refreshed))
    }

    /// Revoke the caller's refresh token
    #[oai(path = "/logout", method = "post", tag = "AuthTags::Authentication")]
    async fn logout(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: Json<LogoutRequest>,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        self.login_coordinator.logout(&ctx, body.0).await?;
        Ok(Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }))
    }

    /// Principal summary with hierarchy-expanded authorities
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, req: &Request, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        Ok(Json(self.login_coordinator.whoami(&ctx)?))
    }

    /// Landing target for clients redirected after a failed authorization
    #[oai(path = "/access-denied", method = "get", tag = "AuthTags::Authentication")]
    async fn access_denied(&self) -> AuthError {
        AuthError::access_denied()
    }

    /// Look up a username by the account's registered email and phone
    #[oai(path = "/recover-username", method = "post", tag = "AuthTags::Authentication")]
    async fn recover_username(
        &self,
        req: &Request,
        body: RecoverUsernamePayload,
    ) -> Result<Json<RecoverUsernameResponse>, AuthError> {
        let ctx = RequestContext::for_api(req);
        let recovered = self.login_coordinator.recover_username(&ctx, body.into_inner()).await?;
        Ok(Json(recovered))
    }

    /// Change the caller's password; every refresh token is revoked
    #[oai(path = "/change-password", method = "post", tag = "AuthTags::Authentication")]
    async fn change_password(
        &self,
        req: &Request,
        auth: BearerAuth,
        body: ChangePasswordPayload,
    ) -> Result<Json<MessageResponse>, AuthError> {
        let ctx = helpers::authenticated_context(&self.app_data, req, &auth).await?;
        self.login_coordinator.change_password(&ctx, body.into_inner()).await?;
        Ok(Json(MessageResponse {
            message: "Password changed; sign in again on other devices".to_string(),
        }))
    }
}
