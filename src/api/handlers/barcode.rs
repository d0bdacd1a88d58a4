//! Barcode generation and validation handlers.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::state::AppState;
use crate::domain::{
    ApiResponse, BarcodeDetails, CodeQuery, GenerateQuery, GenerateResponse, ValidateBatchRequest,
    ValidateBatchResponse, ValidationReport,
};
use crate::error::Result;

/// Generate one or more barcodes.
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<ApiResponse<GenerateResponse>>> {
    let barcodes = state
        .barcode_service
        .generate(query.prefix.as_deref(), query.count)?;

    Ok(Json(ApiResponse::success(GenerateResponse::new(barcodes))))
}

/// Validate a single barcode.
///
/// A malformed code is still a successful request; the report says why it failed.
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Json<ApiResponse<ValidationReport>> {
    Json(ApiResponse::success(
        state.barcode_service.validate(&query.code),
    ))
}

/// Validate a list of barcodes.
pub async fn validate_batch(
    State(state): State<AppState>,
    Json(request): Json<ValidateBatchRequest>,
) -> Result<Json<ApiResponse<ValidateBatchResponse>>> {
    let results = state.barcode_service.validate_batch(&request.codes)?;

    Ok(Json(ApiResponse::success(ValidateBatchResponse {
        results,
    })))
}

/// Break a valid barcode into prefix, payload and check digit.
pub async fn inspect(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Result<Json<ApiResponse<BarcodeDetails>>> {
    let details = state.barcode_service.inspect(&query.code)?;

    Ok(Json(ApiResponse::success(details)))
}
