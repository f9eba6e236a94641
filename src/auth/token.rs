//! HS256 access tokens carrying the username as subject.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated user
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Signing secret and lifetime for access tokens
#[derive(Debug, Clone)]
pub struct TokenConfig {
    secret: String,
    pub expire_minutes: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, expire_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expire_minutes,
        }
    }

    pub fn from_security(security: &SecurityConfig) -> Self {
        Self::new(security.jwt_secret.clone(), security.access_token_expire_minutes)
    }

    fn secret(&self) -> Result<&[u8], AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        Ok(self.secret.as_bytes())
    }
}

/// Issue a token that expires after the configured window
pub fn issue_token(username: &str, config: &TokenConfig) -> Result<String, AuthError> {
    issue_token_with_expiry(username, Duration::minutes(config.expire_minutes), config)
}

/// Issue a token with an explicit lifetime. A negative lifetime yields an
/// already-expired token.
pub fn issue_token_with_expiry(
    username: &str,
    expires_in: Duration,
    config: &TokenConfig,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        exp: (now + expires_in).timestamp(),
        iat: Some(now.timestamp()),
    };

    let key = EncodingKey::from_secret(config.secret()?);
    encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Check signature and expiry and return the claims.
/// Any decode failure or an empty subject is `InvalidToken`.
pub fn verify_token(token: &str, config: &TokenConfig) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(config.secret()?);

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(token, &key, &validation)
        .map_err(|e| {
            tracing::warn!(error = %e, "rejected bearer token");
            AuthError::InvalidToken
        })?
        .claims;

    if claims.sub.trim().is_empty() {
        tracing::warn!("rejected bearer token without subject");
        return Err(AuthError::InvalidToken);
    }
    Ok(claims)
}
