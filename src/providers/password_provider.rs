use std::sync::Arc;

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::config::SecretManager;
use crate::errors::InternalError;

/// Argon2id password hashing keyed with the server-side pepper
pub struct PasswordProvider {
    secret_manager: Arc<SecretManager>,
}

impl PasswordProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    /// Hash `password` in a blocking task; returns the PHC string
    pub async fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let pepper = self.secret_manager.password_pepper().to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            let argon2 = argon2_with_pepper(&pepper)?;
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::crypto("password_hash", e.to_string()))
        })
        .await
        .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
    }

    /// Check `password` against a stored PHC string
    ///
    /// A malformed stored hash is reported as a crypto error, not as a
    /// mismatch.
    pub async fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let pepper = self.secret_manager.password_pepper().to_string();
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&password_hash)
                .map_err(|e| InternalError::crypto("password_verify", e.to_string()))?;
            let argon2 = argon2_with_pepper(&pepper)?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| InternalError::crypto("password_verify", e.to_string()))?
    }
}

fn argon2_with_pepper(pepper: &str) -> Result<Argon2<'_>, InternalError> {
    Argon2::new_with_secret(pepper.as_bytes(), Algorithm::Argon2id, Version::V0x13, Params::default())
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
}

impl std::fmt::Debug for PasswordProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordProvider")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_pepper(pepper: &str) -> PasswordProvider {
        PasswordProvider::new(Arc::new(SecretManager::from_values(
            "test-secret-key-minimum-32-characters-long",
            "test-refresh-secret-minimum-32-chars",
            pepper,
        )))
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let provider = provider_with_pepper("test-pepper-for-unit-tests");
        let hash = provider.hash_password("fridge2024").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(provider.verify_password(&hash, "fridge2024").await.unwrap());
        assert!(!provider.verify_password(&hash, "fridge2025").await.unwrap());
    }

    #[tokio::test]
    async fn test_pepper_is_part_of_the_hash() {
        let hash = provider_with_pepper("test-pepper-for-unit-tests")
            .hash_password("fridge2024")
            .await
            .unwrap();

        let other = provider_with_pepper("another-pepper-value-here");
        assert!(!other.verify_password(&hash, "fridge2024").await.unwrap());
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        let provider = provider_with_pepper("test-pepper-for-unit-tests");

        assert!(matches!(
            provider.verify_password("not-a-phc-string", "fridge2024").await,
            Err(InternalError::Crypto { .. })
        ));
    }
}
