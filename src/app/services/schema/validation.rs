//! Field-level validation of raw document sections
//!
//! Input types are built from a [`RawMap`] through a [`Validator`], which
//! tracks the path to the field being read and records every violation it
//! encounters. A type is never half-rejected: the builder always produces a
//! value and the caller decides at the end, from the collected violations,
//! whether to keep it.

use crate::app::models::{FieldValue, RawMap, RawValue};
use crate::app::services::numeric::normalize_text;
use indexmap::IndexMap;
use serde::Serialize;

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dot-separated path using the export's own key names, e.g. `Hist.2.Checked`
    pub field: String,
    pub message: String,
    /// The offending raw value, rendered as text
    pub input: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (input: {})", self.field, self.message, self.input)
    }
}

/// Validation failure carrying every violated field
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for {model}: {} field violation(s)", violations.len())]
pub struct ValidationError {
    model: &'static str,
    violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Create a validation error for a named input type
    pub fn new(model: &'static str, violations: Vec<FieldViolation>) -> Self {
        Self { model, violations }
    }

    /// Name of the input type that was rejected
    pub fn model(&self) -> &'static str {
        self.model
    }

    /// Every violated field, in document order
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }
}

/// A history record that failed validation and was left out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRejection {
    /// Position in the post-processed history list
    pub index: usize,
    pub violations: Vec<FieldViolation>,
}

/// Input types that can be read from a raw section
pub trait FromRaw: Sized {
    /// Type name used in "valid dictionary or instance of" messages
    const NAME: &'static str;

    /// Read every known field of `map`, reporting problems to `validator`
    fn from_raw(map: &RawMap, validator: &mut Validator) -> Self;
}

/// Collects violations while walking a raw section
#[derive(Debug, Default)]
pub struct Validator {
    path: Vec<String>,
    violations: Vec<FieldViolation>,
}

impl Validator {
    /// Create a validator rooted at the document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator whose paths start at `prefix`
    pub fn at(prefix: impl Into<String>) -> Self {
        Self {
            path: vec![prefix.into()],
            violations: Vec::new(),
        }
    }

    /// Whether nothing has been rejected so far
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations collected so far
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Accept `value` if nothing was rejected
    pub fn finish<T>(self, model: &'static str, value: T) -> Result<T, ValidationError> {
        if self.violations.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(model, self.violations))
        }
    }

    /// Run `read` with `segment` appended to the current path
    fn nested<R>(&mut self, segment: &str, read: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment.to_string());
        let result = read(self);
        self.path.pop();
        result
    }

    fn reject(&mut self, segment: &str, message: impl Into<String>, input: &RawValue) {
        let mut field = self.path.clone();
        field.push(segment.to_string());
        self.violations.push(FieldViolation {
            field: field.join("."),
            message: message.into(),
            input: input.render(),
        });
    }

    /// Read a field that must be text
    pub fn text(&mut self, map: &RawMap, key: &str) -> Option<String> {
        match map.get(key)? {
            RawValue::Text(text) => Some(text.clone()),
            other => {
                self.reject(key, "Input should be a valid string", other);
                None
            }
        }
    }

    /// Read a scalar field and normalize it numerically
    pub fn numeric(&mut self, map: &RawMap, key: &str) -> Option<FieldValue> {
        match map.get(key)? {
            RawValue::Text(text) => normalize_text(text),
            other => {
                self.reject(key, "Input should be a number or a string", other);
                None
            }
        }
    }

    /// Read a nested section as `T`
    pub fn section<T: FromRaw>(&mut self, map: &RawMap, key: &str) -> Option<T> {
        let value = map.get(key)?;
        self.nested_value(key, value)
    }

    /// Read a mapping whose values are all sections of type `T`
    pub fn section_map<T: FromRaw>(
        &mut self,
        map: &RawMap,
        key: &str,
    ) -> Option<IndexMap<String, T>> {
        let value = map.get(key)?;
        let Some(entries) = value.as_section() else {
            self.reject(key, "Input should be a valid dictionary", value);
            return None;
        };

        self.nested(key, |validator| {
            let mut result = IndexMap::with_capacity(entries.len());
            for (entry_key, entry) in entries {
                if let Some(parsed) = validator.nested_value::<T>(entry_key, entry) {
                    result.insert(entry_key.clone(), parsed);
                }
            }
            Some(result)
        })
    }

    /// Read a mapping whose values are all text
    pub fn string_map(&mut self, map: &RawMap, key: &str) -> Option<IndexMap<String, String>> {
        let value = map.get(key)?;
        let Some(entries) = value.as_section() else {
            self.reject(key, "Input should be a valid dictionary", value);
            return None;
        };

        self.nested(key, |validator| {
            let mut result = IndexMap::with_capacity(entries.len());
            for (entry_key, entry) in entries {
                match entry {
                    RawValue::Text(text) => {
                        result.insert(entry_key.clone(), text.clone());
                    }
                    other => validator.reject(entry_key, "Input should be a valid string", other),
                }
            }
            Some(result)
        })
    }

    /// Read a list of sections of type `T`
    pub fn records<T: FromRaw>(&mut self, map: &RawMap, key: &str) -> Option<Vec<T>> {
        let value = map.get(key)?;
        let Some(records) = value.as_records() else {
            self.reject(key, "Input should be a valid list", value);
            return None;
        };

        self.nested(key, |validator| {
            let mut result = Vec::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let parsed = validator.nested(&index.to_string(), |inner| T::from_raw(record, inner));
                result.push(parsed);
            }
            Some(result)
        })
    }

    fn nested_value<T: FromRaw>(&mut self, key: &str, value: &RawValue) -> Option<T> {
        match value {
            RawValue::Section(section) => {
                Some(self.nested(key, |validator| T::from_raw(section, validator)))
            }
            other => {
                self.reject(
                    key,
                    format!("Input should be a valid dictionary or instance of {}", T::NAME),
                    other,
                );
                None
            }
        }
    }
}
