use std::fmt;

use poem_openapi::{ApiResponse, payload::Json};

use crate::errors::api::ErrorResponse;
use crate::errors::internal::{AccessError, AccountError, ComplaintError, CredentialError, InternalError};
use crate::types::internal::validation::FieldErrors;

/// Errors returned by the owner, employee, customer and complaint endpoints
#[derive(ApiResponse, Debug)]
pub enum ManagementError {
    /// One or more fields failed validation
    #[oai(status = 400)]
    ValidationFailed(Json<ErrorResponse>),

    /// Missing, invalid or expired credentials
    #[oai(status = 401)]
    Unauthenticated(Json<ErrorResponse>),

    /// The caller lacks the required role
    #[oai(status = 403)]
    AccessDenied(Json<ErrorResponse>),

    /// The referenced record does not exist
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),

    /// The request conflicts with the record's current state
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

impl ManagementError {
    pub fn validation_failed(errors: FieldErrors) -> Self {
        ManagementError::ValidationFailed(Json(
            ErrorResponse::new("validation_failed", "One or more fields are invalid", 400).with_field_errors(errors),
        ))
    }

    pub fn unauthenticated() -> Self {
        ManagementError::Unauthenticated(Json(ErrorResponse::new(
            "unauthenticated",
            "Authentication required",
            401,
        )))
    }

    pub fn access_denied() -> Self {
        ManagementError::AccessDenied(Json(ErrorResponse::new(
            "access_denied",
            "You do not have permission to perform this action",
            403,
        )))
    }

    pub fn not_found(error: &str, message: impl Into<String>) -> Self {
        ManagementError::NotFound(Json(ErrorResponse::new(error, message, 404)))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ManagementError::Conflict(Json(ErrorResponse::new("conflict", message, 409)))
    }

    pub fn internal_error() -> Self {
        ManagementError::InternalError(Json(ErrorResponse::new(
            "internal_error",
            "An internal error occurred",
            500,
        )))
    }

    pub fn body(&self) -> &ErrorResponse {
        match self {
            ManagementError::ValidationFailed(json)
            | ManagementError::Unauthenticated(json)
            | ManagementError::AccessDenied(json)
            | ManagementError::NotFound(json)
            | ManagementError::Conflict(json)
            | ManagementError::InternalError(json) => &json.0,
        }
    }
}

impl fmt::Display for ManagementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body().message)
    }
}

impl From<InternalError> for ManagementError {
    fn from(err: InternalError) -> Self {
        match err {
            InternalError::Validation(errors) => ManagementError::validation_failed(errors),

            InternalError::Account(AccountError::NotFound { kind, id }) => ManagementError::not_found(
                &format!("{}_not_found", kind.to_lowercase()),
                format!("{} not found: {}", kind, id),
            ),
            InternalError::Account(account_err) => ManagementError::conflict(account_err.to_string()),

            InternalError::Complaint(ComplaintError::InvalidTransition { .. }) => {
                ManagementError::conflict(err.to_string())
            }
            InternalError::Complaint(ComplaintError::NotFound(_)) => {
                ManagementError::not_found("complaint_not_found", err.to_string())
            }
            InternalError::Complaint(ComplaintError::CatalogEntryNotFound { .. }) => {
                ManagementError::not_found("catalog_entry_not_found", err.to_string())
            }

            InternalError::Access(AccessError::Unauthenticated) => ManagementError::unauthenticated(),
            InternalError::Access(AccessError::Forbidden { .. }) => ManagementError::access_denied(),

            InternalError::Credential(CredentialError::RecoveryNotMatched) => {
                ManagementError::not_found("account_not_found", err.to_string())
            }
            InternalError::Credential(CredentialError::ExpiredToken(_)) => ManagementError::Unauthenticated(Json(
                ErrorResponse::new("expired_token", "JWT has expired", 401),
            )),
            InternalError::Credential(CredentialError::InvalidToken { .. } | CredentialError::CredentialNotFound(_)) => {
                ManagementError::Unauthenticated(Json(ErrorResponse::new(
                    "invalid_token",
                    "Invalid or malformed JWT",
                    401,
                )))
            }
            InternalError::Credential(_) => ManagementError::unauthenticated(),

            InternalError::Database { .. }
            | InternalError::Transaction { .. }
            | InternalError::Parse { .. }
            | InternalError::Crypto { .. } => {
                tracing::error!("Internal error: {}", err);
                ManagementError::internal_error()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_field_errors() {
        let mut errors = FieldErrors::new();
        errors.add("phone", "Phone number is already registered");

        let api_error: ManagementError = InternalError::Validation(errors).into();

        match &api_error {
            ManagementError::ValidationFailed(json) => {
                assert_eq!(json.0.status_code, 400);
                assert_eq!(json.0.field_errors.len(), 1);
                assert_eq!(json.0.field_errors[0].field, "phone");
                assert_eq!(json.0.field_errors[0].message, "Phone number is already registered");
            }
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_account_not_found_uses_kind_in_code() {
        let api_error: ManagementError = InternalError::from(AccountError::not_found("Employee", "EMP0000042")).into();

        assert!(matches!(api_error, ManagementError::NotFound(_)));
        assert_eq!(api_error.body().error, "employee_not_found");
        assert_eq!(api_error.body().message, "Employee not found: EMP0000042");
    }

    #[test]
    fn test_status_conflicts_map_to_409() {
        let api_error: ManagementError = InternalError::from(AccountError::AlreadyActive("CUS0000001".to_string())).into();
        assert!(matches!(api_error, ManagementError::Conflict(_)));

        let api_error: ManagementError = InternalError::from(ComplaintError::InvalidTransition {
            from: "RESOLVED".to_string(),
            to: "OPEN".to_string(),
        })
        .into();
        assert!(matches!(api_error, ManagementError::Conflict(_)));
    }

    #[test]
    fn test_access_errors() {
        let api_error: ManagementError = InternalError::from(AccessError::Unauthenticated).into();
        assert!(matches!(api_error, ManagementError::Unauthenticated(_)));

        let api_error: ManagementError =
            InternalError::from(AccessError::Forbidden { required: "ROLE_OWNER".to_string() }).into();
        assert!(matches!(api_error, ManagementError::AccessDenied(_)));
    }

    #[test]
    fn test_infrastructure_errors_are_opaque() {
        let api_error: ManagementError =
            InternalError::database("list_owners", sea_orm::DbErr::Custom("secret detail".to_string())).into();

        assert!(matches!(api_error, ManagementError::InternalError(_)));
        assert!(!api_error.body().message.contains("secret detail"));
    }
}
