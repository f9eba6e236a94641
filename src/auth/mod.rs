pub mod password;
pub mod token;
pub mod users;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use token::{issue_token, issue_token_with_expiry, verify_token, Claims, TokenConfig};
pub use users::{User, UserStore, UserView};

use crate::types::Role;

/// Failures of the login/verify/authorize flow
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("User inactive")]
    Inactive,

    #[error("Not correct access rights")]
    AccessDenied,

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

/// OAuth2-style body returned by `POST /token`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Check credentials against the user table and mint a token for the subject
pub fn login(
    users: &UserStore,
    config: &TokenConfig,
    username: &str,
    password: &str,
) -> Result<TokenResponse, AuthError> {
    let user = users.authenticate(username, password)?;
    let token = issue_token(&user.username, config)?;
    tracing::info!(username = %user.username, role = %user.role, "issued access token");
    Ok(TokenResponse::bearer(token))
}

/// Resolve a bearer token to the user it names
pub fn current_user<'a>(
    users: &'a UserStore,
    config: &TokenConfig,
    token: &str,
) -> Result<&'a User, AuthError> {
    let claims = verify_token(token, config)?;
    users.get(&claims.sub).ok_or_else(|| {
        tracing::warn!(subject = %claims.sub, "token subject is not a known user");
        AuthError::InvalidToken
    })
}

/// Flat per-route check: the user's role must be in the route's allow-list
pub fn authorize(user: &User, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        tracing::warn!(username = %user.username, role = %user.role, "role not allowed on route");
        Err(AuthError::AccessDenied)
    }
}
