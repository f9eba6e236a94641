use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - Service index
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Todo RBAC API",
            "version": version,
            "endpoints": {
                "todo": "POST /todo, GET /todo_list, GET /delete?pk=, PUT /update?pk= (public)",
                "todo_extras": "PUT /get-or-create-todo/:pk, GET /todos-header/:pk (public)",
                "users": "POST /users, GET /users?user_id=, PUT /user/:user_id, DELETE /user/:user_id (public)",
                "token": "POST /token (public - token acquisition)",
                "info": "GET /info (bearer, active user)",
                "rbac": "GET /admin, /user, /protected_resource, /resource_for_authorized (bearer, role-gated)",
                "public": "GET /unprotected_resource",
                "exceptions": "GET /root, /items/:pk, /items_2/:pk, /items_3/:pk, POST /items",
            }
        }
    }))
}

/// GET /health - Store connectivity
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.todos.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

/// GET /unprotected_resource - Open to everyone, token or not
pub async fn unprotected_resource() -> ApiResult<Value> {
    Ok(ApiResponse::message("Welcome!"))
}
