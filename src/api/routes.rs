use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{handle_get, handle_post, AppState};

/// Every resource is served from one endpoint, selected by `?resource=`.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handle_get).post(handle_post))
        .route("/api", get(handle_get).post(handle_post))
        .with_state(state)
}
