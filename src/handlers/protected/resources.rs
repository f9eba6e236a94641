// Role-gated greetings. Each route names its allow-list; the check is a
// flat membership test against the token subject's role.

use serde_json::Value;

use crate::auth::authorize;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::types::Role;

pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const USER_ONLY: &[Role] = &[Role::User];
pub const ADMIN_OR_USER: &[Role] = &[Role::Admin, Role::User];
pub const ANY_ROLE: &[Role] = &Role::ALL;

/// GET /admin
pub async fn admin(AuthUser(user): AuthUser) -> ApiResult<Value> {
    authorize(&user, ADMIN_ONLY)?;
    Ok(ApiResponse::message("Welcome Admin!"))
}

/// GET /user
pub async fn user(AuthUser(user): AuthUser) -> ApiResult<Value> {
    authorize(&user, USER_ONLY)?;
    Ok(ApiResponse::message("Welcome User!"))
}

/// GET /protected_resource
pub async fn protected_resource(AuthUser(user): AuthUser) -> ApiResult<Value> {
    authorize(&user, ADMIN_OR_USER)?;
    Ok(ApiResponse::message("Welcome to protected resource!"))
}

/// GET /resource_for_authorized
pub async fn resource_for_authorized(AuthUser(user): AuthUser) -> ApiResult<Value> {
    authorize(&user, ANY_ROLE)?;
    Ok(ApiResponse::message("Welcome to resource for authorized users!"))
}
