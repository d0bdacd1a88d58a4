//! HTTP request handlers.

pub mod barcode;
pub mod health;
