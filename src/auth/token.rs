use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;

/// Claims carried by an access token. Validity is computed entirely from the
/// signature and `exp` at verification time; nothing is persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("Token generation failed: {0}")]
    Generation(String),

    /// One variant for bad signature, malformed structure and expiry, so the
    /// failure cause is not distinguishable from the outside.
    #[error("Invalid authentication credentials")]
    Invalid,
}

/// Mint a signed access token for `subject`, expiring after `ttl`.
pub fn mint(subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let now = Utc::now();
    let claims = Claims {
        sub: subject,
        exp: (now + ttl).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Generation(e.to_string()))
}

/// Mint a token with the configured default time-to-live.
pub fn mint_default(subject: Uuid) -> Result<String, TokenError> {
    let ttl = Duration::seconds(config::config().security.token_ttl_secs);
    mint(subject, ttl)
}

/// Verify signature and expiration, returning the claims.
pub fn verify(token: &str) -> Result<Claims, TokenError> {
    let secret = &config::config().security.jwt_secret;
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    // No clock leeway: a token expired by one second is already invalid
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| TokenError::Invalid)
}
