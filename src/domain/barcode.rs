//! Validated EAN-13 barcode type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::service::ean13::{self, Ean13Error, PAYLOAD_LEN, PREFIX_LEN};

/// A string known to be a well-formed EAN-13 code.
///
/// Can only be built through [`FromStr`] or [`TryFrom<String>`], both of
/// which run the full check, so holding a `Barcode` means the length, digit
/// and check digit rules hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Barcode(String);

impl Barcode {
    /// The 13 digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading three digits.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.0[..PREFIX_LEN]
    }

    /// The twelve digits covered by the check digit.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.0[..PAYLOAD_LEN]
    }

    /// The final digit.
    #[must_use]
    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[PAYLOAD_LEN] - b'0'
    }

    /// Unwrap into the underlying string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Barcode {
    type Err = Ean13Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ean13::diagnose(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Barcode {
    type Error = Ean13Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ean13::diagnose(&value)?;
        Ok(Self(value))
    }
}

impl From<Barcode> for String {
    fn from(barcode: Barcode) -> Self {
        barcode.0
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
