use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::auth::{self, AuthError, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer` header
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

/// Authenticated user that is also not disabled
#[derive(Clone, Debug)]
pub struct ActiveUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = extract_bearer_token(&parts.headers)?;
        let user = auth::current_user(&state.users, &state.tokens, token)?;
        Ok(AuthUser(user.clone()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ActiveUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.disabled {
            return Err(AuthError::Inactive.into());
        }
        Ok(ActiveUser(user))
    }
}

/// Extract the token from `Authorization: Bearer <token>`
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::NotAuthenticated)?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or(AuthError::NotAuthenticated)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(AuthError::NotAuthenticated);
    }
    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(extract_bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(matches!(
            extract_bearer_token(&HeaderMap::new()),
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Basic dXNlcjpwdw==")),
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Bearer ")),
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            extract_bearer_token(&headers("Bearer")),
            Err(AuthError::NotAuthenticated)
        ));
    }
}
