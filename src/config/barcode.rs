//! Barcode generation configuration.

use serde::Deserialize;

use crate::service::ean13::{DEFAULT_PREFIX, PrefixPolicy};

/// Barcode generation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BarcodeConfig {
    /// Prefix used when a request does not supply one.
    #[serde(default = "default_prefix")]
    pub default_prefix: String,

    /// Which prefixes generation accepts.
    #[serde(default)]
    pub prefix_policy: PrefixPolicy,

    /// Largest number of codes a single generate or batch validate call handles.
    #[serde(default = "default_max_batch")]
    pub max_batch: u32,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

const fn default_max_batch() -> u32 {
    1000
}

impl Default for BarcodeConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
            prefix_policy: PrefixPolicy::default(),
            max_batch: default_max_batch(),
        }
    }
}
