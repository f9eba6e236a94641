//! JSON extractor that runs `validator` rules after deserialization.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::ApiError;

/// Replaces `Json<T>` + manual `.validate()` calls in handlers.
///
/// Both deserialization and rule failures are rejected with a 400
/// `ValidationError` listing the offending fields.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, StatusCode},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestPayload {
        #[validate(length(min = 1, max = 10))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method(http::Method::POST)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_input() {
        let req = json_request(r#"{"name": "hello"}"#);
        let ValidatedJson(payload) = ValidatedJson::<TestPayload>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(payload.name, "hello");
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let req = json_request("not json");
        let err = ValidatedJson::<TestPayload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json()["errors"][0]["field"], "body");
    }

    #[tokio::test]
    async fn rejects_rule_violation() {
        let req = json_request(r#"{"name": "much-too-long-name"}"#);
        let err = ValidatedJson::<TestPayload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_json()["errors"][0]["field"], "name");
    }
}
