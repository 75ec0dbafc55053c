pub mod auth;
pub mod response;

pub use auth::{require_admin, AdminGate, JwtAdminGate};
pub use response::{ApiResponse, ApiResult};
