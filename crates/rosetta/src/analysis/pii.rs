//! Personally identifying value detection.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::Scalar;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:\+|\b)\d{1,3}[\s.-]?(?:\(\d{3}\)|\d{3})|\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b",
    )
    .unwrap()
});

static NATIONAL_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap());

/// Returns true if any value looks like an email, phone number, or national ID.
///
/// Nulls and empty strings are skipped.
pub fn detect_pii(values: &[Scalar]) -> bool {
    values.iter().any(|value| {
        if value.is_null() {
            return false;
        }
        let text = value.to_string();
        if text.is_empty() {
            return false;
        }
        EMAIL_RE.is_match(&text) || PHONE_RE.is_match(&text) || NATIONAL_ID_RE.is_match(&text)
    })
}
