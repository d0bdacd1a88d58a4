//! EAN-13 barcode codec.
//!
//! Generates codes shaped as `prefix (3) ‖ time (6) ‖ random (3) ‖ check (1)`
//! and validates arbitrary strings against the EAN-13 check digit rule:
//! payload digits are weighted 1, 3, 1, 3, ... from the left and the check
//! digit brings the weighted sum to a multiple of 10.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Total length of an EAN-13 code.
pub const BARCODE_LEN: usize = 13;

/// Number of payload digits preceding the check digit.
pub const PAYLOAD_LEN: usize = 12;

/// Length of a prefix under the strict policy.
pub const PREFIX_LEN: usize = 3;

/// Prefix used when the caller does not supply one.
pub const DEFAULT_PREFIX: &str = "789";

/// Width of the time segment.
const TIME_DIGITS: usize = 6;

/// Width of the random segment.
const RANDOM_DIGITS: usize = 3;

const TIME_MODULUS: i64 = 1_000_000;

/// Exclusive upper bound of the random segment.
pub const RANDOM_MODULUS: u32 = 1_000;

/// Which prefixes generation accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefixPolicy {
    /// Exactly three ASCII digits.
    #[default]
    Strict,
    /// Any digit string of at least three characters. The check digit always
    /// covers the first 12 characters of the body, so longer prefixes produce
    /// codes that do not validate.
    Permissive,
}

impl std::fmt::Display for PrefixPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Permissive => write!(f, "permissive"),
        }
    }
}

/// Reason a string is not a valid EAN-13 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Ean13Error {
    /// Not 13 characters long.
    #[error("expected 13 characters, got {actual}")]
    WrongLength {
        /// Number of characters in the input.
        actual: usize,
    },

    /// A character that is not an ASCII decimal digit.
    #[error("non-digit character {found:?} at position {position}")]
    NonDigit {
        /// Zero-based character position.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The 13th digit disagrees with the computed check digit.
    #[error("check digit mismatch: expected {expected}, found {found}")]
    CheckDigitMismatch {
        /// Check digit computed over the payload.
        expected: u8,
        /// Check digit present in the input.
        found: u8,
    },
}

/// Reason a prefix was rejected by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PrefixError {
    /// Not exactly 3 characters (strict) or fewer than 3 (permissive).
    #[error("prefix must be {expected} digits, got {actual} characters")]
    Length {
        /// Required length: "3" for strict, "at least 3" for permissive.
        expected: &'static str,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The prefix contains a non-digit.
    #[error("prefix contains non-digit character {found:?} at position {position}")]
    NonDigit {
        /// Zero-based character position.
        position: usize,
        /// The offending character.
        found: char,
    },
}

/// Compute the check digit of a 12-digit payload given as digit values.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn check_digit(payload: &[u8; PAYLOAD_LEN]) -> u8 {
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

/// Compute the check digit over the first 12 characters of `payload`.
///
/// Returns `None` if `payload` is shorter than 12 characters or any of the
/// first 12 is not an ASCII digit. Characters past the 12th are ignored.
#[must_use]
pub fn compute_check_digit(payload: &str) -> Option<u8> {
    let bytes = payload.as_bytes();
    if bytes.len() < PAYLOAD_LEN {
        return None;
    }

    let mut digits = [0u8; PAYLOAD_LEN];
    for (slot, &b) in digits.iter_mut().zip(bytes) {
        if !b.is_ascii_digit() {
            return None;
        }
        *slot = b - b'0';
    }

    Some(check_digit(&digits))
}

/// Check whether `code` is a well-formed EAN-13 code.
#[must_use]
pub fn validate(code: &str) -> bool {
    diagnose(code).is_ok()
}

/// Validate `code` and report the first check that failed.
///
/// Checks run in order: length, payload digits, check digit character,
/// check digit value.
///
/// # Errors
///
/// Returns the [`Ean13Error`] describing why `code` is not a valid EAN-13 code.
pub fn diagnose(code: &str) -> Result<(), Ean13Error> {
    let actual = code.chars().count();
    if actual != BARCODE_LEN {
        return Err(Ean13Error::WrongLength { actual });
    }

    let mut digits = [0u8; BARCODE_LEN];
    for (position, (slot, found)) in digits.iter_mut().zip(code.chars()).enumerate() {
        if !found.is_ascii_digit() {
            return Err(Ean13Error::NonDigit { position, found });
        }
        *slot = found as u8 - b'0';
    }

    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&digits[..PAYLOAD_LEN]);

    let expected = check_digit(&payload);
    let found = digits[PAYLOAD_LEN];
    if expected != found {
        return Err(Ean13Error::CheckDigitMismatch { expected, found });
    }

    Ok(())
}

/// Check `prefix` against `policy`.
///
/// # Errors
///
/// Returns a [`PrefixError`] if the prefix contains a non-digit or has a
/// length `policy` does not allow.
pub fn check_prefix(prefix: &str, policy: PrefixPolicy) -> Result<(), PrefixError> {
    if let Some((position, found)) = prefix.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(PrefixError::NonDigit { position, found });
    }

    let actual = prefix.len();
    match policy {
        PrefixPolicy::Strict if actual != PREFIX_LEN => Err(PrefixError::Length {
            expected: "3",
            actual,
        }),
        PrefixPolicy::Permissive if actual < PREFIX_LEN => Err(PrefixError::Length {
            expected: "at least 3",
            actual,
        }),
        _ => Ok(()),
    }
}

/// Build a code from a digit prefix, a clock reading and a random draw.
///
/// The time segment is the last 6 decimal digits of `millis` and the random
/// segment is `random` modulo 1000, both zero-padded. The check digit is
/// computed over the first 12 characters of the resulting body and appended.
///
/// `prefix` must be at least three ASCII digits; see [`check_prefix`].
#[must_use]
pub fn compose(prefix: &str, millis: i64, random: u32) -> String {
    debug_assert!(
        check_prefix(prefix, PrefixPolicy::Permissive).is_ok(),
        "compose needs at least three ASCII digits, got {prefix:?}"
    );

    let time_part = millis.rem_euclid(TIME_MODULUS);
    let rand_part = random % RANDOM_MODULUS;

    let mut body = String::with_capacity(prefix.len() + TIME_DIGITS + RANDOM_DIGITS + 1);
    body.push_str(prefix);
    body.push_str(&format!(
        "{time_part:0tw$}{rand_part:0rw$}",
        tw = TIME_DIGITS,
        rw = RANDOM_DIGITS
    ));

    // 12 leading digits are guaranteed by the prefix check above
    let check = compute_check_digit(&body).unwrap_or_default();
    body.push(char::from(b'0' + check));
    body
}

/// Generate a fresh code with a 3-digit `prefix`.
///
/// # Errors
///
/// Returns a [`PrefixError`] unless `prefix` is exactly three ASCII digits.
pub fn generate(prefix: &str) -> Result<String, PrefixError> {
    generate_with_policy(prefix, PrefixPolicy::Strict)
}

/// Generate a fresh code with the default `789` prefix.
#[must_use]
pub fn generate_default() -> String {
    compose(DEFAULT_PREFIX, Utc::now().timestamp_millis(), draw())
}

/// Generate a fresh code, accepting prefixes according to `policy`.
///
/// # Errors
///
/// Returns a [`PrefixError`] if `policy` rejects `prefix`.
pub fn generate_with_policy(prefix: &str, policy: PrefixPolicy) -> Result<String, PrefixError> {
    check_prefix(prefix, policy)?;
    Ok(compose(prefix, Utc::now().timestamp_millis(), draw()))
}

/// Uniform draw for the random segment.
fn draw() -> u32 {
    rand::rng().random_range(0..RANDOM_MODULUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_digit() {
        assert_eq!(compute_check_digit("400638133393"), Some(1));
        assert!(validate("4006381333931"));
    }

    #[test]
    fn test_check_digit_zero_case() {
        // weighted sum 0 must give 0, not 10
        assert_eq!(check_digit(&[0; PAYLOAD_LEN]), 0);
        assert!(validate("0000000000000"));
    }

    #[test]
    fn test_compute_check_digit_rejects_short_or_non_digit() {
        assert_eq!(compute_check_digit("40063813339"), None);
        assert_eq!(compute_check_digit("40063813339X"), None);
        // only the first 12 characters matter
        assert_eq!(compute_check_digit("400638133393XYZ"), Some(1));
    }

    #[test]
    fn test_validate_negative_cases() {
        assert!(!validate("123"));
        assert!(!validate(""));
        assert!(!validate("40063813339X1"));
        assert!(!validate("4006381333930"));
        assert!(!validate("40063813339311"));
    }

    #[test]
    fn test_validate_rejects_non_digit_check_character() {
        assert!(!validate("400638133393X"));
        assert_eq!(
            diagnose("400638133393X"),
            Err(Ean13Error::NonDigit {
                position: 12,
                found: 'X'
            })
        );
    }

    #[test]
    fn test_validate_rejects_unicode_digits() {
        // Arabic-Indic digit one in the payload
        assert!(!validate("400638133393\u{0661}"));
        assert!(!validate("\u{0664}006381333931"));
    }

    #[test]
    fn test_diagnose_reports_first_failure() {
        assert_eq!(diagnose("123"), Err(Ean13Error::WrongLength { actual: 3 }));
        assert_eq!(
            diagnose("40063813339X1"),
            Err(Ean13Error::NonDigit {
                position: 11,
                found: 'X'
            })
        );
        assert_eq!(
            diagnose("4006381333930"),
            Err(Ean13Error::CheckDigitMismatch {
                expected: 1,
                found: 0
            })
        );
        assert_eq!(diagnose("4006381333931"), Ok(()));
    }

    #[test]
    fn test_validate_is_repeatable() {
        for code in ["4006381333931", "4006381333930", "abc"] {
            let first = validate(code);
            for _ in 0..10 {
                assert_eq!(validate(code), first);
            }
        }
    }

    #[test]
    fn test_generate_round_trip() {
        for prefix in ["789", "000", "400", "999"] {
            for _ in 0..100 {
                let code = generate(prefix).unwrap();
                assert_eq!(code.len(), BARCODE_LEN);
                assert!(code.starts_with(prefix));
                assert!(validate(&code), "generated invalid code {code}");
            }
        }
    }

    #[test]
    fn test_generate_default_uses_789() {
        let a = generate_default();
        let b = generate_default();
        assert!(a.starts_with(DEFAULT_PREFIX));
        assert!(validate(&a));
        assert!(validate(&b));
    }

    #[test]
    fn test_compose_layout() {
        let code = compose("789", 1_700_000_123_456, 42);
        assert_eq!(&code[..3], "789");
        assert_eq!(&code[3..9], "123456");
        assert_eq!(&code[9..12], "042");
        assert_eq!(code.len(), BARCODE_LEN);
        assert!(validate(&code));
    }

    #[test]
    fn test_compose_known_value() {
        // 7+24+9+3+2+9+4+15+6+0+4+6 = 89
        assert_eq!(compose("789", 1_700_000_123_456, 42), "7891234560421");
    }

    #[test]
    fn test_compose_pads_small_inputs() {
        let code = compose("789", 42, 7);
        assert_eq!(&code[..12], "789000042007");
        assert!(validate(&code));

        let wrapped = compose("789", 5, 1_007);
        assert_eq!(&wrapped[..12], "789000005007");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least three ASCII digits")]
    fn test_compose_rejects_short_prefix() {
        let _ = compose("78", 1_700_000_123_456, 42);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "at least three ASCII digits")]
    fn test_compose_rejects_non_digit_prefix() {
        let _ = compose("7a9", 1_700_000_123_456, 42);
    }

    #[test]
    fn test_strict_policy_rejects_bad_prefixes() {
        assert_eq!(
            generate("78"),
            Err(PrefixError::Length {
                expected: "3",
                actual: 2
            })
        );
        assert_eq!(
            generate("7890"),
            Err(PrefixError::Length {
                expected: "3",
                actual: 4
            })
        );
        assert_eq!(
            generate("7a9"),
            Err(PrefixError::NonDigit {
                position: 1,
                found: 'a'
            })
        );
        assert!(generate("").is_err());
    }

    #[test]
    fn test_permissive_policy_keeps_shifted_window() {
        let code = generate_with_policy("7890", PrefixPolicy::Permissive).unwrap();
        assert_eq!(code.len(), 4 + BARCODE_LEN - PREFIX_LEN);
        assert!(!validate(&code));

        // the check digit covers the first 12 characters only
        let last = code.as_bytes()[code.len() - 1] - b'0';
        assert_eq!(compute_check_digit(&code), Some(last));

        let long = generate_with_policy("40012345", PrefixPolicy::Permissive).unwrap();
        assert_eq!(long.len(), 8 + BARCODE_LEN - PREFIX_LEN);
        assert!(long.starts_with("40012345"));
        assert!(!validate(&long));
    }

    #[test]
    fn test_permissive_policy_with_three_digits_validates() {
        let code = generate_with_policy("501", PrefixPolicy::Permissive).unwrap();
        assert!(validate(&code));
    }

    #[test]
    fn test_permissive_policy_still_rejects_non_digits() {
        assert!(generate_with_policy("abcd", PrefixPolicy::Permissive).is_err());
        assert_eq!(
            generate_with_policy("12", PrefixPolicy::Permissive),
            Err(PrefixError::Length {
                expected: "at least 3",
                actual: 2
            })
        );
    }

    #[test]
    fn test_policy_serde() {
        let policy: PrefixPolicy = serde_json::from_str("\"permissive\"").unwrap();
        assert_eq!(policy, PrefixPolicy::Permissive);
        assert_eq!(serde_json::to_string(&PrefixPolicy::Strict).unwrap(), "\"strict\"");
    }
}
