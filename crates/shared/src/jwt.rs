//! Session token utilities.
//!
//! Session tokens are HS256-signed JWTs asserting an authenticated account's
//! identity, role, and expiry. They are minted at login and verified by the
//! authorization middleware. Invitation tokens are a separate, opaque token
//! family (see `shared::token`) and are never signed with this key.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for session token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account ID)
    pub sub: String,
    /// Username, echoed for display without a store round-trip
    pub username: String,
    /// Account role ("admin" or "registerer")
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token identifier
    pub jti: String,
}

impl SessionClaims {
    /// Parses the subject claim back into an account ID.
    pub fn account_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::InvalidToken)
    }
}

/// Default session lifetime: 8 hours.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 8 * 3600;

/// Default leeway in seconds for clock skew tolerance.
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for session token generation and validation.
#[derive(Clone)]
pub struct SessionTokenConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Session token expiration in seconds
    pub ttl_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for SessionTokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenConfig")
            .field("ttl_secs", &self.ttl_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl SessionTokenConfig {
    /// Creates a new config from the signing secret.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self::with_leeway(secret, ttl_secs, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new config with a custom clock-skew leeway.
    pub fn with_leeway(secret: &str, ttl_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            leeway_secs,
        }
    }

    /// Mints a session token for the given account.
    pub fn generate(
        &self,
        account_id: Uuid,
        username: &str,
        role: &str,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            username: username.to_string(),
            role: role.to_string(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a session token and returns its claims.
    ///
    /// Expired and malformed tokens are reported as distinct variants so the
    /// caller can log them apart, but both must map to an unauthenticated
    /// outcome at the HTTP surface.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken,
            },
        )?;

        Ok(data.claims)
    }
}
