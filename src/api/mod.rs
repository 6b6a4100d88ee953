pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;

pub use errors::{ApiError, ApiResult};
pub use routes::create_router;
