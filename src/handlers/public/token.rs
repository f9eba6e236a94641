use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Deserialize;

use crate::auth::{self, TokenResponse};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Credentials from an OAuth2 password form, or a JSON body with the same fields
#[derive(Debug)]
pub struct LoginForm(pub Credentials);

#[async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let credentials = if is_json {
            let Json(credentials) = Json::<Credentials>::from_request(req, state).await?;
            credentials
        } else {
            let Form(credentials) = Form::<Credentials>::from_request(req, state).await?;
            credentials
        };
        Ok(LoginForm(credentials))
    }
}

/// POST /token - Exchange username/password for a bearer token
///
/// Returns the bare OAuth2 body `{"access_token": ..., "token_type": "bearer"}`.
pub async fn login(
    State(state): State<AppState>,
    LoginForm(credentials): LoginForm,
) -> Result<Json<TokenResponse>, ApiError> {
    let response = auth::login(
        &state.users,
        &state.tokens,
        &credentials.username,
        &credentials.password,
    )?;
    Ok(Json(response))
}
