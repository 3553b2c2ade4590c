/// A secret read from the environment and the shortest value accepted for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretConfig {
    pub name: &'static str,
    pub min_length: usize,
}

impl SecretConfig {
    /// HS256 signing key for access tokens
    pub const JWT: SecretConfig = SecretConfig::env("JWT_SECRET", 32);

    /// HMAC key for refresh-token digests
    pub const REFRESH_TOKEN: SecretConfig = SecretConfig::env("REFRESH_TOKEN_SECRET", 32);

    /// Argon2 secret mixed into every password hash
    pub const PASSWORD_PEPPER: SecretConfig = SecretConfig::env("PASSWORD_PEPPER", 16);

    pub const fn env(name: &'static str, min_length: usize) -> Self {
        Self { name, min_length }
    }

    pub fn is_long_enough(&self, value: &str) -> bool {
        value.len() >= self.min_length
    }
}
