// API error types - converted from InternalError at the endpoint boundary
pub mod auth;
pub mod management;

use poem_openapi::Object;

use crate::types::internal::validation::FieldErrors;

pub use auth::AuthError;
pub use management::ManagementError;

/// A field that failed validation, as reported to clients
#[derive(Object, Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorResponse {
    /// Form field name
    pub field: String,

    /// Configured message for the failed constraint
    pub message: String,
}

/// Standardized error body shared by every endpoint
#[derive(Object, Debug, Clone)]
pub struct ErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,

    /// Per-field validation failures, present only for validation errors
    #[oai(skip_serializing_if_is_empty, default)]
    pub field_errors: Vec<FieldErrorResponse>,
}

impl ErrorResponse {
    pub fn new(error: &str, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
            status_code,
            field_errors: Vec::new(),
        }
    }

    pub fn with_field_errors(mut self, errors: FieldErrors) -> Self {
        self.field_errors = errors
            .into_iter()
            .map(|e| FieldErrorResponse {
                field: e.field,
                message: e.message,
            })
            .collect();
        self
    }
}
