//! Barcode service.
//!
//! Applies the configured prefix defaults and batch limits on top of the
//! EAN-13 codec and records generation/validation metrics.

use std::collections::HashSet;

use metrics::counter;
use tracing::debug;

use crate::config::BarcodeConfig;
use crate::domain::{Barcode, BarcodeDetails, ValidationReport};
use crate::error::{AppError, Result};
use crate::service::ean13::{self, Ean13Error, PrefixPolicy};

/// Draws allowed per requested code before a batch is abandoned.
const ATTEMPTS_PER_CODE: u32 = 16;

/// Service for barcode generation and validation.
pub struct BarcodeService {
    /// Prefix used when the caller supplies none.
    default_prefix: String,
    /// Which prefixes are accepted.
    policy: PrefixPolicy,
    /// Upper bound on batch sizes.
    max_batch: u32,
}

impl BarcodeService {
    /// Create a new barcode service.
    pub fn new(config: &BarcodeConfig) -> Self {
        Self {
            default_prefix: config.default_prefix.clone(),
            policy: config.prefix_policy,
            max_batch: config.max_batch,
        }
    }

    /// Generate `count` distinct barcodes.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix override; the configured default when `None`
    /// * `count` - Number of codes, `1..=max_batch`
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an out-of-range count, `InvalidPrefix` if the
    /// policy rejects the prefix, and `Internal` if enough distinct codes
    /// cannot be drawn.
    pub fn generate(&self, prefix: Option<&str>, count: u32) -> Result<Vec<String>> {
        self.check_batch_size(count as usize, "count")?;

        let prefix = prefix.unwrap_or(&self.default_prefix);
        ean13::check_prefix(prefix, self.policy)?;

        let wanted = count as usize;
        let mut seen = HashSet::with_capacity(wanted);
        let mut barcodes = Vec::with_capacity(wanted);
        let mut attempts = 0u32;

        while barcodes.len() < wanted {
            if attempts >= count.saturating_mul(ATTEMPTS_PER_CODE) {
                return Err(AppError::Internal(format!(
                    "could not draw {count} distinct barcodes for prefix {prefix}"
                )));
            }
            attempts += 1;

            let code = ean13::generate_with_policy(prefix, self.policy)?;
            if seen.insert(code.clone()) {
                barcodes.push(code);
            }
        }

        debug!(prefix, count, attempts, "Generated barcodes");
        counter!("barcode_generated_total").increment(u64::from(count));

        Ok(barcodes)
    }

    /// Validate a single barcode string.
    pub fn validate(&self, code: &str) -> ValidationReport {
        let outcome = ean13::diagnose(code);
        let report = ValidationReport {
            code: code.to_string(),
            valid: outcome.is_ok(),
            reason: outcome.err().map(|e| e.to_string()),
            expected_check_digit: ean13::compute_check_digit(code),
        };

        let result = if report.valid { "valid" } else { "invalid" };
        counter!("barcode_validated_total", "result" => result).increment(1);

        report
    }

    /// Validate several barcode strings, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if `codes` is empty or longer than `max_batch`.
    pub fn validate_batch(&self, codes: &[String]) -> Result<Vec<ValidationReport>> {
        self.check_batch_size(codes.len(), "codes")?;

        let reports: Vec<_> = codes.iter().map(|code| self.validate(code)).collect();
        debug!(
            total = reports.len(),
            valid = reports.iter().filter(|r| r.valid).count(),
            "Validated batch"
        );

        Ok(reports)
    }

    /// Break a valid barcode into its parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBarcode` if `code` is not a valid EAN-13 code.
    pub fn inspect(&self, code: &str) -> Result<BarcodeDetails> {
        let barcode: Barcode = code.parse().map_err(|e: Ean13Error| {
            counter!("barcode_validated_total", "result" => "invalid").increment(1);
            AppError::InvalidBarcode(e)
        })?;
        counter!("barcode_validated_total", "result" => "valid").increment(1);

        Ok(BarcodeDetails::from(barcode))
    }

    /// The prefix used when requests omit one.
    pub fn default_prefix(&self) -> &str {
        &self.default_prefix
    }

    fn check_batch_size(&self, len: usize, what: &str) -> Result<()> {
        if len == 0 {
            return Err(AppError::BadRequest(format!("{what} must not be empty")));
        }
        if len > self.max_batch as usize {
            return Err(AppError::BadRequest(format!(
                "{what} cannot exceed {}",
                self.max_batch
            )));
        }
        Ok(())
    }
}
