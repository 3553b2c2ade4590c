// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. They perform actual work like hashing,
// validation, token handling and cross-table checks.

pub mod authentication_provider;
pub mod crypto_provider;
pub mod password_provider;
pub mod token_provider;
pub mod uniqueness_provider;
pub mod validation_provider;

// Re-export providers for clean imports
pub use authentication_provider::AuthenticationProvider;
pub use crypto_provider::CryptoProvider;
pub use password_provider::PasswordProvider;
pub use token_provider::TokenProvider;
pub use uniqueness_provider::UniquenessProvider;
pub use validation_provider::ValidationProvider;
