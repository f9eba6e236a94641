use crate::auth::UserView;
use crate::middleware::{ActiveUser, ApiResponse, ApiResult};

/// GET /info - The authenticated user's profile; disabled users get 403
pub async fn info(ActiveUser(user): ActiveUser) -> ApiResult<UserView> {
    Ok(ApiResponse::success(user.view()))
}
