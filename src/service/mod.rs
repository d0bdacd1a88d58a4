//! Service layer module.
//!
//! Contains the EAN-13 codec and the business logic built on it.

pub mod barcode;
pub mod ean13;

pub use barcode::BarcodeService;
