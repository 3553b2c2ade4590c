// Config layer - settings, secrets, logging and database bootstrap
pub mod application_settings;
pub mod bootstrap_settings;
pub mod config_spec;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;
pub mod secret_config;
pub mod secret_manager;

pub use application_settings::ApplicationSettings;
pub use bootstrap_settings::BootstrapSettings;
pub use env_provider::{EnvironmentProvider, MockEnvironment, SystemEnvironment};
pub use errors::ApplicationError;
pub use logging::init_logging;
pub use secret_config::SecretConfig;
pub use secret_manager::{SecretError, SecretManager};
