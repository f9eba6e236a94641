// Exception-mapping demonstrations. Each route raises one error kind on a
// specific input and answers `{"msg": "OK"}` otherwise.

use axum::extract::{rejection::PathRejection, Path};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Item {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tax: Option<f64>,
}

fn ok() -> ApiResponse<Value> {
    ApiResponse::success(json!({ "msg": "OK" }))
}

/// GET /root - Always fails inside the handler; surfaces as a generic 500
pub async fn root() -> ApiResult<Value> {
    let divisor: i64 = 0;
    let quotient = 1i64.checked_div(divisor).ok_or_else(|| {
        tracing::error!("division by zero in /root");
        ApiError::internal_server_error("Internal Server Error")
    })?;
    Ok(ApiResponse::success(json!({ "msg": "OK", "result": quotient })))
}

/// GET /items/:pk - pk 1 raises CustomA (404)
pub async fn item_a(path: Result<Path<i64>, PathRejection>) -> ApiResult<Value> {
    let Path(pk) = path?;
    if pk == 1 {
        return Err(ApiError::custom_a());
    }
    Ok(ok())
}

/// GET /items_2/:pk - pk 2 raises CustomB (500)
pub async fn item_b(path: Result<Path<i64>, PathRejection>) -> ApiResult<Value> {
    let Path(pk) = path?;
    if pk == 2 {
        return Err(ApiError::custom_b());
    }
    Ok(ok())
}

/// GET /items_3/:pk - pk 3 raises CustomC (400)
pub async fn item_c(path: Result<Path<i64>, PathRejection>) -> ApiResult<Value> {
    let Path(pk) = path?;
    if pk == 3 {
        tracing::warn!("CustomC raised; check the log");
        return Err(ApiError::custom_c());
    }
    Ok(ok())
}

/// POST /items - Negative prices are a value error (400)
pub async fn create_item(ValidatedJson(item): ValidatedJson<Item>) -> ApiResult<Value> {
    if item.price < 0.0 {
        return Err(ApiError::bad_request("Price must be non-negative"));
    }
    Ok(ApiResponse::success(json!({
        "message": "Item created successfully",
        "item": item,
    })))
}
