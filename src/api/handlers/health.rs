//! Health check handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::state::AppState;
use crate::domain::{ApiResponse, HealthResponse, ReadyComponents, ReadyResponse};
use crate::error::ErrorCode;
use crate::service::ean13;

/// Published EAN-13 example used for the readiness self-check.
const SELF_CHECK_CODE: &str = "4006381333931";

/// Liveness check - always returns 200 if the service is running.
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness check - checks if the service can serve requests.
pub async fn ready() -> (StatusCode, Json<ApiResponse<ReadyResponse>>) {
    let codec_ok = ean13::validate(SELF_CHECK_CODE) && ean13::validate(&ean13::generate_default());

    let data = ReadyResponse {
        ready: codec_ok,
        components: ReadyComponents { codec: codec_ok },
    };

    if codec_ok {
        (StatusCode::OK, Json(ApiResponse::success(data)))
    } else {
        let response = ApiResponse {
            code: ErrorCode::SERVICE_UNAVAILABLE.as_i32(),
            message: "service unavailable".to_string(),
            data: Some(data),
        };
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Prometheus metrics endpoint.
pub async fn metrics(State(state): State<AppState>) -> String {
    let mut output = String::new();

    output.push_str("# HELP barcode_worker_up Whether the service is up\n");
    output.push_str("# TYPE barcode_worker_up gauge\n");
    output.push_str("barcode_worker_up 1\n");

    if let Some(handle) = &state.metrics {
        output.push_str(&handle.render());
    }

    output
}
