//! Lookup key validation.
//!
//! The cache-aside lookup accepts any predicate `Fn(&str) -> bool`; the
//! functions here are the ones the HTTP layer plugs in.

use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

use crate::error::AppError;

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("digits-only pattern is valid"));

/// Returns true if `key` is a non-empty string of ASCII digits.
pub fn is_digits(key: &str) -> bool {
    DIGITS_ONLY.is_match(key)
}

/// Accepts every key; used for fixed internal cache keys.
pub fn any_key(_key: &str) -> bool {
    true
}

/// Runs `validator` against `key`.
///
/// # Errors
///
/// Returns [`AppError::InvalidKey`] if the predicate rejects the key.
pub fn ensure_valid<V>(key: &str, validator: V) -> Result<(), AppError>
where
    V: Fn(&str) -> bool,
{
    if validator(key) {
        Ok(())
    } else {
        Err(AppError::invalid_key(
            "Invalid key format",
            json!({ "key": key }),
        ))
    }
}
