//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the console.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;
use crate::utils::errors::ValidationError;

/// Placeholder shown wherever a value is absent
pub const MISSING: &str = "-";

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Parse operator-supplied text as a signed 64-bit id.
///
/// Surrounding whitespace is ignored; anything else that is not a plain
/// decimal integer is rejected.
pub fn parse_id(input: &str) -> Result<i64, ValidationError> {
    input.trim().parse::<i64>().map_err(|_| ValidationError::NotANumber {
        input: input.to_string(),
    })
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in its own offset
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format an optional timestamp, falling back to the missing marker
pub fn format_optional_timestamp(timestamp: Option<&DateTime<FixedOffset>>) -> String {
    timestamp.map(format_timestamp).unwrap_or_else(|| MISSING.to_string())
}

/// Escape text for inclusion in HTML bodies and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Return the text, or the missing marker when it is empty
pub fn or_missing(text: &str) -> &str {
    if text.is_empty() {
        MISSING
    } else {
        text
    }
}
