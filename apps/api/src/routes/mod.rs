pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;
use crate::upload::{MAX_UPLOAD_BYTES, MULTIPART_OVERHEAD_BYTES};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/analyze",
            post(handlers::handle_analyze)
                // Transport cap; the upload gate enforces the exact file limit.
                .layer(DefaultBodyLimit::max(
                    MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
                )),
        )
        .with_state(state)
}
