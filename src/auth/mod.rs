pub mod password;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: i64,
    pub iat: i64,
}

/// Largest ttl chrono can represent, in whole hours
const MAX_TTL_HOURS: i64 = i64::MAX / 3_600_000;

impl Claims {
    pub fn new(user_id: i64, issued_at: DateTime<Utc>, ttl: Duration) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Generation("token expiry out of range".to_string()))?;

        Ok(Self {
            user_id,
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid JWT token: {0}")]
    Invalid(String),
}

/// Issues and verifies HS256 identity tokens with injected key material
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        let hours = i64::try_from(security.jwt_expiry_hours)
            .unwrap_or(i64::MAX)
            .min(MAX_TTL_HOURS);
        Self::new(security.jwt_secret.as_bytes(), Duration::hours(hours))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(user_id, issued_at, self.ttl)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Validate signature and expiry, returning the embedded user id
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if data.claims.user_id <= 0 {
            return Err(TokenError::Invalid("missing user id".to_string()));
        }
        Ok(data.claims.user_id)
    }
}

/// Only the owner of a resource may delete it
pub fn require_ownership(owner_id: i64, caller_id: i64, resource: &str) -> Result<(), ServiceError> {
    if owner_id != caller_id {
        return Err(ServiceError::Forbidden(format!(
            "you are not authorized to delete this {}",
            resource
        )));
    }
    Ok(())
}
