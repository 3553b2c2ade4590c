use std::fmt;
use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::prelude::*;
use uuid::Uuid;

use crate::config::{ApplicationSettings, SecretManager};
use crate::errors::InternalError;
use crate::errors::internal::CredentialError;
use crate::providers::crypto_provider::CryptoProvider;
use crate::types::internal::auth::{AccountKind, Claims};

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: i64,
}

/// Provides JWT generation and validation plus refresh token operations
pub struct TokenProvider {
    secret_manager: Arc<SecretManager>,
    crypto_provider: Arc<CryptoProvider>,
    jwt_expiration_minutes: i64,
    refresh_expiration_days: i64,
}

impl TokenProvider {
    pub fn new(
        secret_manager: Arc<SecretManager>,
        crypto_provider: Arc<CryptoProvider>,
        settings: &ApplicationSettings,
    ) -> Self {
        Self {
            secret_manager,
            crypto_provider,
            jwt_expiration_minutes: settings.access_token_minutes,
            refresh_expiration_days: settings.refresh_token_days,
        }
    }

    /// Sign an access token for `user_id` carrying its directly granted roles
    pub fn generate_jwt(
        &self,
        user_id: &str,
        username: &str,
        account_kind: AccountKind,
        roles: Vec<String>,
    ) -> Result<IssuedToken, InternalError> {
        let now = Utc::now().timestamp();
        let expiration = now + self.access_token_seconds();
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            account_kind,
            roles,
            exp: expiration,
            iat: now,
            jti: jti.clone(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
        )
        .map_err(|e| InternalError::crypto("jwt_generation", format!("Failed to generate JWT: {}", e)))?;

        tracing::debug!(user_id = %user_id, jti = %jti, "Issued access token");

        Ok(IssuedToken {
            token,
            jti,
            expires_at: expiration,
        })
    }

    /// Validate a JWT and return the claims
    pub fn validate_jwt(&self, token: &str) -> Result<Claims, InternalError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_manager.jwt_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => InternalError::from(CredentialError::ExpiredToken("jwt".to_string())),
            _ => {
                tracing::debug!("Rejected access token: {}", e);
                InternalError::from(CredentialError::invalid_token("jwt", "invalid signature or malformed"))
            }
        })
    }

    /// Generate a cryptographically secure refresh token
    ///
    /// 32 random bytes, base64-encoded (44 characters).
    pub fn generate_refresh_token(&self) -> String {
        let mut rng = rand::rng();
        let random_bytes: [u8; 32] = rng.random();
        general_purpose::STANDARD.encode(random_bytes)
    }

    /// Hex HMAC-SHA256 of a refresh token under the refresh secret
    pub fn hash_refresh_token(&self, token: &str) -> Result<String, InternalError> {
        self.crypto_provider
            .hmac_sha256_token(self.secret_manager.refresh_token_secret(), token)
    }

    /// Unix timestamp at which a refresh token issued now expires
    pub fn refresh_expiration(&self) -> i64 {
        Utc::now().timestamp() + self.refresh_expiration_days * 24 * 60 * 60
    }

    pub fn access_token_seconds(&self) -> i64 {
        self.jwt_expiration_minutes * 60
    }
}

impl fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProvider")
            .field("secret_manager", &"<redacted>")
            .field("jwt_expiration_minutes", &self.jwt_expiration_minutes)
            .field("refresh_expiration_days", &self.refresh_expiration_days)
            .finish()
    }
}

impl fmt::Display for TokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenProvider {{ jwt_expiration: {}min, refresh_expiration: {}days }}",
            self.jwt_expiration_minutes, self.refresh_expiration_days
        )
    }
}
