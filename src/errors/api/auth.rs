use std::fmt;

use poem_openapi::{ApiResponse, payload::Json};

use crate::errors::api::ErrorResponse;
use crate::errors::internal::{AccessError, CredentialError, InternalError};
use crate::types::internal::validation::FieldErrors;

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Invalid username or password
    #[oai(status = 401)]
    InvalidCredentials(Json<ErrorResponse>),

    /// Account has been deactivated
    #[oai(status = 403)]
    AccountInactive(Json<ErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<ErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<ErrorResponse>),

    /// Invalid refresh token
    #[oai(status = 401)]
    InvalidRefreshToken(Json<ErrorResponse>),

    /// Refresh token has expired
    #[oai(status = 401)]
    ExpiredRefreshToken(Json<ErrorResponse>),

    /// Access denied
    #[oai(status = 403)]
    AccessDenied(Json<ErrorResponse>),

    /// No account matched the recovery details
    #[oai(status = 404)]
    RecoveryFailed(Json<ErrorResponse>),

    /// One or more fields failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl AuthError {
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(ErrorResponse::new(
            "invalid_credentials",
            "Invalid username or password",
            401,
        )))
    }

    pub fn account_inactive() -> Self {
        AuthError::AccountInactive(Json(ErrorResponse::new(
            "account_inactive",
            "This account has been deactivated",
            403,
        )))
    }

    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(ErrorResponse::new("invalid_token", "Invalid or malformed JWT", 401)))
    }

    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(ErrorResponse::new("expired_token", "JWT has expired", 401)))
    }

    pub fn invalid_refresh_token() -> Self {
        AuthError::InvalidRefreshToken(Json(ErrorResponse::new(
            "invalid_refresh_token",
            "Invalid refresh token",
            401,
        )))
    }

    pub fn expired_refresh_token() -> Self {
        AuthError::ExpiredRefreshToken(Json(ErrorResponse::new(
            "expired_refresh_token",
            "Refresh token has expired",
            401,
        )))
    }

    pub fn access_denied() -> Self {
        AuthError::AccessDenied(Json(ErrorResponse::new(
            "access_denied",
            "You do not have permission to access this resource",
            403,
        )))
    }

    pub fn recovery_failed() -> Self {
        AuthError::RecoveryFailed(Json(ErrorResponse::new(
            "account_not_found",
            "No account matches the supplied details",
            404,
        )))
    }

    pub fn validation_failed(errors: FieldErrors) -> Self {
        AuthError::ValidationFailed(Json(
            ErrorResponse::new("validation_failed", "One or more fields are invalid", 400).with_field_errors(errors),
        ))
    }

    pub fn internal_error() -> Self {
        AuthError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    pub fn body(&self) -> &ErrorResponse {
        match self {
            AuthError::InvalidCredentials(json)
            | AuthError::AccountInactive(json)
            | AuthError::InvalidToken(json)
            | AuthError::ExpiredToken(json)
            | AuthError::InvalidRefreshToken(json)
            | AuthError::ExpiredRefreshToken(json)
            | AuthError::AccessDenied(json)
            | AuthError::RecoveryFailed(json)
            | AuthError::ValidationFailed(json)
            | AuthError::InternalError(json) => &json.0,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body().message)
    }
}

impl From<InternalError> for AuthError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Credential(CredentialError::InvalidCredentials) => AuthError::invalid_credentials(),
            InternalError::Credential(CredentialError::AccountInactive(_)) => AuthError::account_inactive(),
            InternalError::Credential(CredentialError::IncorrectPassword) => {
                let mut errors = FieldErrors::new();
                errors.add("current_password", "Current password is incorrect");
                AuthError::validation_failed(errors)
            }
            InternalError::Credential(CredentialError::InvalidToken { token_type, .. }) => {
                if token_type == "refresh_token" {
                    AuthError::invalid_refresh_token()
                } else {
                    AuthError::invalid_token()
                }
            }
            InternalError::Credential(CredentialError::ExpiredToken(token_type)) => {
                if token_type == "refresh_token" {
                    AuthError::expired_refresh_token()
                } else {
                    AuthError::expired_token()
                }
            }
            InternalError::Credential(CredentialError::CredentialNotFound(_)) => AuthError::invalid_token(),
            InternalError::Credential(CredentialError::RecoveryNotMatched) => AuthError::recovery_failed(),

            InternalError::Validation(errors) => AuthError::validation_failed(errors),

            InternalError::Access(AccessError::Unauthenticated) => AuthError::invalid_token(),
            InternalError::Access(AccessError::Forbidden { .. }) => AuthError::access_denied(),

            other => {
                tracing::error!("Internal error during authentication: {}", other);
                AuthError::internal_error()
            }
        }
    }
}
