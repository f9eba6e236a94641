use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::database::{Todo, TodoPayload};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PkQuery {
    pub pk: i32,
}

/// POST /todo - Create a todo and return it with its generated id
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TodoPayload>,
) -> ApiResult<Todo> {
    let todo = state.todos.add(payload).await?;
    tracing::info!(id = todo.id, "todo created");
    Ok(ApiResponse::created(todo))
}

/// GET /todo_list - All todos
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Todo>> {
    let todos = state.todos.list().await?;
    Ok(ApiResponse::success(todos))
}

/// GET /delete?pk= - Delete a todo by id
pub async fn delete(
    State(state): State<AppState>,
    query: Result<Query<PkQuery>, QueryRejection>,
) -> ApiResult<serde_json::Value> {
    let Query(PkQuery { pk }) = query?;
    state.todos.delete(pk).await?;
    tracing::info!(id = pk, "todo deleted");
    Ok(ApiResponse::message(format!("Todo with id {} deleted", pk)))
}

/// PUT /update?pk= - Overwrite title, description and completed
pub async fn update(
    State(state): State<AppState>,
    query: Result<Query<PkQuery>, QueryRejection>,
    ValidatedJson(payload): ValidatedJson<TodoPayload>,
) -> ApiResult<Todo> {
    let Query(PkQuery { pk }) = query?;
    let todo = state.todos.update(pk, payload).await?;
    tracing::info!(id = pk, "todo updated");
    Ok(ApiResponse::success(todo))
}

/// PUT /get-or-create-todo/:pk - Return the todo, creating it from the body when absent.
///
/// A created todo gets a fresh store-generated id, not `pk`.
pub async fn get_or_create(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    ValidatedJson(payload): ValidatedJson<TodoPayload>,
) -> ApiResult<Todo> {
    let Path(pk) = path?;
    if let Some(todo) = state.todos.get(pk).await? {
        return Ok(ApiResponse::success(todo));
    }
    let todo = state.todos.add(payload).await?;
    tracing::info!(requested = pk, id = todo.id, "todo created by get-or-create");
    Ok(ApiResponse::success(todo))
}

/// GET /todos-header/:pk - Single todo with a custom response header.
///
/// The 404 carries an `X-Error` header.
pub async fn get_with_header(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(pk) = path?;
    match state.todos.get(pk).await? {
        Some(todo) => {
            let mut response = ApiResponse::success(todo).into_response();
            response
                .headers_mut()
                .insert("x-todo-source", HeaderValue::from_static("todo-rbac-api"));
            Ok(response)
        }
        None => {
            let mut response = ApiError::not_found("ITEM NOT FOUND").into_response();
            response
                .headers_mut()
                .insert("x-error", HeaderValue::from_static("There goes my error"));
            Ok(response)
        }
    }
}
