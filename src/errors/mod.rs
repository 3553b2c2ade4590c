// Errors layer - Error type definitions
pub mod api;
pub mod internal;

pub use api::{AuthError, ErrorResponse, ManagementError};
pub use internal::InternalError;
