//! US zipcode format validation and normalization.

use regex::Regex;
use std::sync::LazyLock;

static US_ZIPCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}(-\d{4})?$").expect("zipcode pattern is valid"));

/// Check a string against the US zipcode grammar: `12345` or `12345-6789`.
pub fn is_valid(input: &str) -> bool {
    US_ZIPCODE.is_match(input.trim())
}

/// Reduce a zipcode to the five-digit form the upstream APIs expect.
///
/// ZIP+4 input is truncated to its first five digits; anything else is
/// returned trimmed and otherwise unchanged.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    match trimmed.split_once('-') {
        Some((five, _)) => five.to_string(),
        None => trimmed.to_string(),
    }
}
