//! Domain models for the barcode worker.
//!
//! This module contains the validated barcode type and the API contracts.

pub mod barcode;
pub mod dto;

pub use barcode::Barcode;
pub use dto::{
    ApiResponse, BarcodeDetails, CodeQuery, GenerateQuery, GenerateResponse, HealthResponse,
    ReadyComponents, ReadyResponse, ValidateBatchRequest, ValidateBatchResponse, ValidationReport,
};
