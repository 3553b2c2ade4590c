use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::AccountType;

/// Request model for user login
#[derive(Object, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,
}

redacted_debug!(LoginRequest { username } secret { password });

form_or_json!(LoginPayload, LoginRequest);

/// Response model containing authentication tokens
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Refresh token for obtaining new access tokens
    pub refresh_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,

    /// Business id of the signed-in person
    pub user_id: String,

    /// Roles granted to the account
    pub roles: Vec<String>,

    /// Roles plus everything they imply through the role hierarchy
    pub authorities: Vec<String>,
}

/// Response model for whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    pub user_id: String,
    pub username: String,
    pub account_type: AccountType,
    pub roles: Vec<String>,
    pub authorities: Vec<String>,
}

/// Request model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token to exchange for a new access token
    pub refresh_token: String,
}

/// Response model for token refresh
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,
}

/// Request model for logout
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke
    pub refresh_token: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RecoverUsernameRequest {
    pub email: String,
    pub phone: String,
}

form_or_json!(RecoverUsernamePayload, RecoverUsernameRequest);

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RecoverUsernameResponse {
    pub username: String,
}

/// Request model for password change
#[derive(Object, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password for verification
    pub current_password: String,

    /// New password to set
    pub new_password: String,

    /// Must repeat `new_password`
    pub confirm_password: String,
}

redacted_debug!(ChangePasswordRequest {} secret { current_password, new_password, confirm_password });

form_or_json!(ChangePasswordPayload, ChangePasswordRequest);
