pub mod auth;
pub mod response;
pub mod validated;

pub use auth::{ActiveUser, AuthUser};
pub use response::{ApiResponse, ApiResult};
pub use validated::ValidatedJson;
