// User CRUD sample over the `users` table. Not-found keeps its 404; any
// other store failure becomes a 500 naming the operation.

use axum::extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State};
use serde::Deserialize;
use serde_json::Value;

use crate::database::{DatabaseError, UserRecord, UserRecordPayload};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i32,
}

fn store_failure(action: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| match err {
        DatabaseError::UserNotFound(_) => err.into(),
        other => {
            tracing::error!(error = %other, "{}", action);
            ApiError::internal_server_error(action)
        }
    }
}

/// POST /users
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRecordPayload>,
) -> ApiResult<UserRecord> {
    let record = state
        .user_records
        .create(payload)
        .await
        .map_err(store_failure("Failed to create user"))?;
    tracing::info!(id = record.id, "user row created");
    Ok(ApiResponse::created(record))
}

/// GET /users?user_id=
pub async fn fetch(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<UserRecord> {
    let Query(UserIdQuery { user_id }) = query?;
    state
        .user_records
        .find(user_id)
        .await
        .map_err(store_failure("Failed to fetch user from db"))?
        .map(ApiResponse::success)
        .ok_or_else(|| DatabaseError::UserNotFound(user_id).into())
}

/// PUT /user/:user_id
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<UserRecordPayload>,
) -> ApiResult<UserRecord> {
    let Path(user_id) = path?;
    let record = state
        .user_records
        .update(user_id, payload)
        .await
        .map_err(store_failure("Failed to update user in database"))?;
    Ok(ApiResponse::success(record))
}

/// DELETE /user/:user_id
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Value> {
    let Path(user_id) = path?;
    state
        .user_records
        .delete(user_id)
        .await
        .map_err(store_failure("Failed to delete user in database"))?;
    tracing::info!(id = user_id, "user row deleted");
    Ok(ApiResponse::message("User deleted successfully"))
}
