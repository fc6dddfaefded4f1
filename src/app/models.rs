//! Data models for Fridge-tag processing
//!
//! This module contains the untyped tree produced by the hierarchy parser and
//! the scalar value type produced by numeric normalization. Both are shared
//! by the parser, the schema layer, and the adapters.

use crate::constants::HISTORY_KEY;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Raw Document Tree
// =============================================================================

/// Insertion-ordered mapping from key to raw value
pub type RawMap = IndexMap<String, RawValue>;

/// A node of the raw document tree
///
/// The parser only ever produces strings and mappings; the history
/// post-processor turns the history section into an ordered list of
/// mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// Scalar text exactly as it appeared after trimming
    Text(String),

    /// Nested section
    Section(RawMap),

    /// Ordered per-day history records
    Records(Vec<RawMap>),
}

impl RawValue {
    /// Borrow the text if this is a scalar
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the mapping if this is a section
    pub fn as_section(&self) -> Option<&RawMap> {
        match self {
            RawValue::Section(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the list if this is a record list
    pub fn as_records(&self) -> Option<&[RawMap]> {
        match self {
            RawValue::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Short name of the value shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Text(_) => "text",
            RawValue::Section(_) => "section",
            RawValue::Records(_) => "list",
        }
    }

    /// Render the value for error reports (text verbatim, containers as JSON)
    pub fn render(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            other => serde_json::to_string(other).unwrap_or_else(|_| other.kind().to_string()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<RawMap> for RawValue {
    fn from(map: RawMap) -> Self {
        RawValue::Section(map)
    }
}

/// The untyped document built by the hierarchy parser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDocument {
    root: RawMap,
}

impl RawDocument {
    /// Wrap a root mapping
    pub fn new(root: RawMap) -> Self {
        Self { root }
    }

    /// Root mapping
    pub fn root(&self) -> &RawMap {
        &self.root
    }

    /// Mutable root mapping
    pub fn root_mut(&mut self) -> &mut RawMap {
        &mut self.root
    }

    /// Consume into the root mapping
    pub fn into_root(self) -> RawMap {
        self.root
    }

    /// Look up a top-level key
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.root.get(key)
    }

    /// Post-processed history records, if the history key holds a list
    pub fn history(&self) -> Option<&[RawMap]> {
        self.root.get(HISTORY_KEY).and_then(RawValue::as_records)
    }

    /// Replace the history list, keeping the key's position
    pub fn set_history(&mut self, records: Vec<RawMap>) {
        self.root
            .insert(HISTORY_KEY.to_string(), RawValue::Records(records));
    }
}

// =============================================================================
// Normalized Scalar Values
// =============================================================================

/// A scalar after numeric normalization
///
/// Numbers that could be parsed become `Integer` or `Decimal`; everything
/// else is kept as the original `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl FieldValue {
    /// Coerce for a decimal-typed output field (integers widen, text passes through)
    pub fn into_decimal(self) -> Self {
        match self {
            FieldValue::Integer(value) => FieldValue::Decimal(value as f64),
            other => other,
        }
    }

    /// Coerce for an integer-typed output field (integral decimals narrow,
    /// everything else passes through)
    pub fn into_whole(self) -> Self {
        match self {
            FieldValue::Decimal(value)
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 =>
            {
                FieldValue::Integer(value as i64)
            }
            other => other,
        }
    }

    /// Integer view following truncation semantics for decimals and
    /// plain integer parsing for text
    ///
    /// Decimals that are not finite or fall outside the `i64` range have no
    /// integer view.
    pub fn to_whole_number(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(value) => Some(*value),
            FieldValue::Decimal(value) => {
                let whole = value.trunc();
                (whole >= i64::MIN as f64 && whole < i64::MAX as f64).then_some(whole as i64)
            }
            FieldValue::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }

    /// Borrow the text if normalization left this as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Decimal(value) => write!(f, "{}", value),
            FieldValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}
