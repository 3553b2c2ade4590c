use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{EnvironmentProvider, SecretConfig, SystemEnvironment};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecretError {
    #[error("Required secret '{secret_name}' is missing")]
    Missing { secret_name: String },

    #[error("Secret '{secret_name}' must be at least {expected} characters, got {actual}")]
    InvalidLength {
        secret_name: String,
        expected: usize,
        actual: usize,
    },
}

/// Centralized manager for application secrets
pub struct SecretManager {
    jwt_secret: String,
    refresh_token_secret: String,
    password_pepper: String,
}

impl SecretManager {
    /// Load and validate all secrets from the process environment
    pub fn init() -> Result<Self, SecretError> {
        Self::init_with_provider(Arc::new(SystemEnvironment))
    }

    pub fn init_with_provider(
        env_provider: Arc<dyn EnvironmentProvider + Send + Sync>,
    ) -> Result<Self, SecretError> {
        let jwt_secret = Self::load_secret(env_provider.as_ref(), SecretConfig::JWT)?;
        let refresh_token_secret = Self::load_secret(env_provider.as_ref(), SecretConfig::REFRESH_TOKEN)?;
        let password_pepper = Self::load_secret(env_provider.as_ref(), SecretConfig::PASSWORD_PEPPER)?;

        Ok(Self {
            jwt_secret,
            refresh_token_secret,
            password_pepper,
        })
    }

    /// Build from already-known values, bypassing length rules
    pub fn from_values(
        jwt_secret: impl Into<String>,
        refresh_token_secret: impl Into<String>,
        password_pepper: impl Into<String>,
    ) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            refresh_token_secret: refresh_token_secret.into(),
            password_pepper: password_pepper.into(),
        }
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn refresh_token_secret(&self) -> &str {
        &self.refresh_token_secret
    }

    pub fn password_pepper(&self) -> &str {
        &self.password_pepper
    }

    fn load_secret(
        env_provider: &(dyn EnvironmentProvider + Send + Sync),
        config: SecretConfig,
    ) -> Result<String, SecretError> {
        let value = env_provider.get_setting(config.name).ok_or_else(|| SecretError::Missing {
            secret_name: config.name.to_string(),
        })?;

        if !config.is_long_enough(&value) {
            return Err(SecretError::InvalidLength {
                secret_name: config.name.to_string(),
                expected: config.min_length,
                actual: value.len(),
            });
        }

        Ok(value)
    }
}

impl fmt::Debug for SecretManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretManager")
            .field("jwt_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("password_pepper", &"[REDACTED]")
            .finish()
    }
}
