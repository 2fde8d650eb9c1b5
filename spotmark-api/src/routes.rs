//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Spot prices
        .route("/prices", get(handlers::get_prices))
        // Simple moving average
        .route("/ma", get(handlers::get_moving_average))
        .with_state(state)
}
