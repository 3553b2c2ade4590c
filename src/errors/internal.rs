use thiserror::Error;

use crate::types::internal::validation::FieldErrors;

/// Internal error type for store, provider and coordinator operations
///
/// Infrastructure variants (Database, Transaction, Parse, Crypto) are shared by
/// every layer; the domain variants carry what the API layer needs to pick a
/// status code. Never serialized directly: the API converts it to
/// `AuthError` or `ManagementError`.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error("Database error: {operation} failed: {source}")]
    Database {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Transaction error: {operation} failed: {source}")]
    Transaction {
        operation: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error("Crypto error: {operation} failed: {message}")]
    Crypto { operation: String, message: String },

    /// One or more form fields failed their constraints
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Complaint(#[from] ComplaintError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

impl InternalError {
    pub fn database(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Database {
            operation: operation.into(),
            source,
        }
    }

    pub fn transaction(operation: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Transaction {
            operation: operation.into(),
            source,
        }
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Single-field validation failure
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }
}

impl From<FieldErrors> for InternalError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

/// Person account lifecycle errors (owners, employees, customers)
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("Account {0} is already active")]
    AlreadyActive(String),

    #[error("Account {0} is already inactive")]
    AlreadyInactive(String),

    #[error("You cannot deactivate your own account")]
    SelfDeactivation,

    #[error("At least one active owner must remain")]
    LastActiveOwner,

    #[error("An owner account already exists")]
    OwnerExists,
}

impl AccountError {
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

/// Credential and authentication errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive: {0}")]
    AccountInactive(String),

    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Invalid token: {token_type} - {reason}")]
    InvalidToken { token_type: String, reason: String },

    #[error("Expired token: {0}")]
    ExpiredToken(String),

    #[error("No account matches the supplied details")]
    RecoveryNotMatched,
}

impl CredentialError {
    pub fn invalid_token(token_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            token_type: token_type.into(),
            reason: reason.into(),
        }
    }
}

/// Complaint workflow errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ComplaintError {
    #[error("Complaint not found: {0}")]
    NotFound(String),

    #[error("Cannot move complaint from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("{entry} not found: {id}")]
    CatalogEntryNotFound { entry: String, id: i32 },
}

/// Authorization failures raised by the request context
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied: {required} required")]
    Forbidden { required: String },
}
