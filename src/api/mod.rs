//! API module
//!
//! HTTP API endpoints and middleware.

pub mod extract;
pub mod middleware;
pub mod routes;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::storage::Storage;

pub use routes::create_router;

/// Build the application router: API routes, health check, middleware
pub fn build_router(storage: Storage) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        .merge(create_router())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(storage)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
