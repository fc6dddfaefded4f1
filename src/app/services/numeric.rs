//! Best-effort numeric normalization for loosely formatted device values
//!
//! Fridge-tag exports write numbers with explicit signs (`+8.0`), trailing
//! inline segments (`600, 1`), and `---` for "no value". Normalization turns
//! what it can into numbers and hands everything else back untouched; it
//! never fails.

use crate::app::models::FieldValue;
use crate::constants::MISSING_VALUE_SENTINEL;
use tracing::trace;

/// Normalize a raw text value
///
/// - `---` maps to `None`
/// - the part before the first comma is trimmed and parsed as a decimal when
///   it contains `.`, `e` or `E`, otherwise as an integer
/// - anything that does not parse is returned as the original text
pub fn normalize_text(raw: &str) -> Option<FieldValue> {
    if raw == MISSING_VALUE_SENTINEL {
        return None;
    }

    let number_part = raw.split(',').next().unwrap_or_default().trim();
    let looks_decimal = number_part.contains('.') || number_part.to_lowercase().contains('e');

    let parsed = if looks_decimal {
        number_part
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(FieldValue::Decimal)
    } else {
        number_part.parse::<i64>().ok().map(FieldValue::Integer)
    };

    match parsed {
        Some(value) => Some(value),
        None => {
            trace!(
                "Could not parse numeric value from '{}' (number part '{}'), keeping original",
                raw, number_part
            );
            Some(FieldValue::Text(raw.to_string()))
        }
    }
}

/// Normalize an optional value; numbers pass through unchanged
///
/// Applying this twice gives the same result as applying it once.
pub fn normalize(value: Option<FieldValue>) -> Option<FieldValue> {
    match value {
        None => None,
        Some(FieldValue::Text(text)) => normalize_text(&text),
        Some(number) => Some(number),
    }
}
