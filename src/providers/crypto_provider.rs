use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

const PASSWORD_LENGTH: usize = 20;
const PASSWORD_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                  abcdefghijklmnopqrstuvwxyz\
                                  0123456789\
                                  !@#$%^&*()_+-=[]{}|;:,.<>?";

/// Cryptographic operations provider
///
/// HMAC-SHA256 digests for refresh tokens and generated passwords for
/// bootstrap accounts.
pub struct CryptoProvider;

impl CryptoProvider {
    pub fn new() -> Self {
        Self
    }

    /// Compute HMAC-SHA256 of `token` under `key` as lowercase hex
    pub fn hmac_sha256_token(&self, key: &str, token: &str) -> Result<String, InternalError> {
        let mut mac = HmacSha256::new_from_slice(key.as_bytes())
            .map_err(|e| InternalError::crypto("hmac_sha256", e.to_string()))?;
        mac.update(token.as_bytes());
        let result = mac.finalize();
        Ok(format!("{:x}", result.into_bytes()))
    }

    /// Generate a 20-character random password
    ///
    /// Drawn from upper and lower case letters, digits and symbols. Always
    /// contains at least one letter and one digit so it passes the password
    /// rule.
    pub fn generate_secure_password(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let password: String = (0..PASSWORD_LENGTH)
                .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
                .collect();

            let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
            let has_digit = password.chars().any(|c| c.is_ascii_digit());
            if has_letter && has_digit {
                return password;
            }
        }
    }
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_token_consistency() {
        let crypto = CryptoProvider::new();

        let hash1 = crypto.hmac_sha256_token("test-secret-key", "test-token-12345").unwrap();
        let hash2 = crypto.hmac_sha256_token("test-secret-key", "test-token-12345").unwrap();

        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hmac_sha256_token_different_keys_produce_different_hashes() {
        let crypto = CryptoProvider::new();

        let hash1 = crypto.hmac_sha256_token("key1", "test-token-12345").unwrap();
        let hash2 = crypto.hmac_sha256_token("key2", "test-token-12345").unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hmac_sha256_token_hex_format() {
        let hash = CryptoProvider::new().hmac_sha256_token("key", "token").unwrap();

        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        // HMAC-SHA256 produces 32 bytes = 64 hex characters
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_generate_secure_password() {
        let crypto = CryptoProvider::new();
        let password = crypto.generate_secure_password();

        assert_eq!(password.len(), 20);
        assert!(password.chars().any(|c| c.is_ascii_alphabetic()));
        assert!(password.chars().any(|c| c.is_ascii_digit()));
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)));
        assert_ne!(password, crypto.generate_secure_password());
    }
}
