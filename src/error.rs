// HTTP API Error Types
use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use validator::ValidationErrors;

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// One offending field of a rejected request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub msg: String,
    pub value: Value,
}

impl FieldError {
    pub fn new(field: impl Into<String>, msg: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            msg: msg.into(),
            value,
        }
    }
}

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    #[error("{message}")]
    ValidationError {
        message: String,
        field_errors: Vec<FieldError>,
    },

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 403 Forbidden
    #[error("{0}")]
    Forbidden(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    InternalServerError(String),

    // 503 Service Unavailable
    #[error("{0}")]
    ServiceUnavailable(String),

    // Demonstration exceptions with their own body shapes
    #[error("Method not allowed")]
    CustomA { description: String },
    #[error("Internal Server error")]
    CustomB { description: String },
    #[error("Bad request")]
    CustomC {
        description: String,
        additional: String,
    },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::CustomA { .. } => StatusCode::NOT_FOUND,
            ApiError::CustomB { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::CustomC { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::CustomA { .. } => "CUSTOM_A",
            ApiError::CustomB { .. } => "CUSTOM_B",
            ApiError::CustomC { .. } => "CUSTOM_C",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let status = self.status_code().as_u16();
        match self {
            ApiError::ValidationError {
                message,
                field_errors,
            } => json!({
                "error": true,
                "message": message,
                "code": self.error_code(),
                "errors": field_errors,
            }),
            ApiError::CustomA { description } => json!({
                "status_code": status,
                "error": self.to_string(),
                "info": description,
            }),
            ApiError::CustomB { description } => json!({
                "error": self.to_string(),
                "description": description,
            }),
            ApiError::CustomC {
                description,
                additional,
            } => json!({
                "status_code": status,
                "detail": self.to_string(),
                "description": description,
                "additional": additional,
            }),
            _ => json!({
                "error": true,
                "message": self.to_string(),
                "code": self.error_code(),
            }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    pub fn custom_a() -> Self {
        ApiError::CustomA {
            description: "your browser has sent an HTTP request (GET, POST, PUT, etc.) that isnt allowed for that resource".to_string(),
        }
    }

    pub fn custom_b() -> Self {
        ApiError::CustomB {
            description: "Your request raised server error. Dont do requests like that".to_string(),
        }
    }

    pub fn custom_c() -> Self {
        ApiError::CustomC {
            description: "Your request is wrong".to_string(),
            additional: "ABOBA".to_string(),
        }
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::TodoNotFound(_) | DatabaseError::UserNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            DatabaseError::InvalidDatabaseUrl(_) => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::NotAuthenticated | AuthError::InvalidToken => {
                ApiError::unauthorized(err.to_string())
            }
            AuthError::Inactive | AuthError::AccessDenied => ApiError::forbidden(err.to_string()),
            AuthError::InvalidSecret | AuthError::TokenGeneration(_) | AuthError::PasswordHash(_) => {
                tracing::error!("Authentication backend error: {}", err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, list)| {
                list.iter().map(move |e| {
                    FieldError::new(
                        field.to_string(),
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                        e.params.get("value").cloned().unwrap_or(Value::Null),
                    )
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::validation_error("Request validation failed", field_errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let text = rejection.body_text();
        let field = json_error_field(&text).unwrap_or_else(|| "body".to_string());
        ApiError::validation_error(
            "Malformed request body",
            vec![FieldError::new(field, text, Value::Null)],
        )
    }
}

/// Field named by a serde deserialization message: either a missing
/// field or the path prefix of a type mismatch.
fn json_error_field(text: &str) -> Option<String> {
    if let Some(rest) = text.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }
    let detail = text.split_once("target type: ")?.1;
    let (path, _) = detail.split_once(": ")?;
    (!path.is_empty() && !path.contains(' ')).then(|| path.to_string())
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::validation_error(
            "Malformed form body",
            vec![FieldError::new("body", rejection.body_text(), Value::Null)],
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation_error(
            "Malformed query string",
            vec![FieldError::new("query", rejection.body_text(), Value::Null)],
        )
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation_error(
            "Malformed path parameter",
            vec![FieldError::new("path", rejection.body_text(), Value::Null)],
        )
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let mut response = (status, Json(self.to_json())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
