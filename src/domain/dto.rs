//! Data Transfer Objects for API requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Barcode;

/// Standard API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, non-zero = error).
    pub code: i32,

    /// Human-readable message.
    pub message: String,

    /// Response data (omitted on error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a success response.
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    /// Create an error response.
    pub fn error(code: i32, message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Query parameters for barcode generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuery {
    /// Prefix override; the configured default is used when absent.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Number of barcodes to generate (default: 1).
    #[serde(default = "default_count")]
    pub count: u32,
}

const fn default_count() -> u32 {
    1
}

/// Query parameters naming a single barcode.
#[derive(Debug, Clone, Deserialize)]
pub struct CodeQuery {
    /// The barcode string to check.
    pub code: String,
}

/// Request body for batch validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateBatchRequest {
    /// Barcode strings to check, in order.
    pub codes: Vec<String>,
}

/// Generated barcodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated codes, pairwise distinct.
    pub barcodes: Vec<String>,
}

impl GenerateResponse {
    /// Create a new generation response.
    pub const fn new(barcodes: Vec<String>) -> Self {
        Self { barcodes }
    }
}

/// Outcome of validating one barcode string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// The input, echoed back.
    pub code: String,

    /// Whether the input is a well-formed EAN-13 code.
    pub valid: bool,

    /// Why validation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Check digit computed over the first 12 characters, when they are digits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_check_digit: Option<u8>,
}

/// Batch validation results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateBatchResponse {
    /// One report per input, in input order.
    pub results: Vec<ValidationReport>,
}

/// Breakdown of a valid barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeDetails {
    /// The barcode.
    pub barcode: Barcode,

    /// Leading three digits.
    pub prefix: String,

    /// The twelve digits covered by the check digit.
    pub payload: String,

    /// The final digit.
    pub check_digit: u8,
}

impl From<Barcode> for BarcodeDetails {
    fn from(barcode: Barcode) -> Self {
        Self {
            prefix: barcode.prefix().to_string(),
            payload: barcode.payload().to_string(),
            check_digit: barcode.check_digit(),
            barcode,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service version.
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Overall readiness status.
    pub ready: bool,

    /// Individual component statuses.
    pub components: ReadyComponents,
}

/// Component readiness statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyComponents {
    /// Codec self-check status.
    pub codec: bool,
}
