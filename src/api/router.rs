//! Router setup and configuration.

use axum::{
    Router,
    http::Uri,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{barcode, health};
use crate::api::state::AppState;
use crate::error::AppError;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let mut health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    if state.config.observability.metrics_enabled {
        health_routes = health_routes.route(
            &state.config.observability.metrics_path,
            get(health::metrics),
        );
    }

    let barcode_routes = Router::new()
        .route("/generate", get(barcode::generate))
        .route(
            "/validate",
            get(barcode::validate).post(barcode::validate_batch),
        )
        .route("/inspect", get(barcode::inspect));

    Router::new()
        .merge(health_routes)
        .nest("/v1/barcode", barcode_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
