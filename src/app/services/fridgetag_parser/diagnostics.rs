//! Parse diagnostics and statistics
//!
//! The parser records what it skipped or repaired instead of logging it
//! directly. [`Diagnostic::emit`] forwards an event to `tracing` at the
//! matching level.

use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Diagnostic severity, mapped onto tracing levels when emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// What the parser ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Non-blank line without any colon; ignored
    MissingColon,
    /// Segment of an inline section list without a colon; skipped
    MalformedSegment,
    /// Trailing segment of a scalar line without a colon; skipped
    MalformedSibling,
    /// Timestamp moved from the history section to the document root
    TimestampRelocated,
    /// No history section at all; an empty list was substituted
    HistoryMissing,
    /// History key present but not a section; an empty list was substituted
    HistoryNotSection,
    /// History entry that is not a section; dropped
    HistoryEntryNotSection,
}

/// A single structured parse event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 1-based source line, when the event belongs to a line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    /// Create an event tied to a source line
    pub fn at_line(
        line: usize,
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            line: Some(line),
            severity,
            kind,
            message: message.into(),
        }
    }

    /// Create a document-level event
    pub fn document(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            line: None,
            severity,
            kind,
            message: message.into(),
        }
    }

    /// Forward this event to the tracing subscriber
    pub fn emit(&self) {
        let location = match self.line {
            Some(line) => format!("Line {}: ", line),
            None => String::new(),
        };
        match self.severity {
            Severity::Debug => debug!("{}{}", location, self.message),
            Severity::Info => info!("{}{}", location, self.message),
            Severity::Warning => warn!("{}{}", location, self.message),
            Severity::Error => error!("{}{}", location, self.message),
        }
    }
}

/// Line-level statistics for one parse call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Lines in the input, blank ones included
    pub total_lines: usize,

    /// Blank lines skipped
    pub blank_lines: usize,

    /// Non-blank lines without a colon
    pub unstructured_lines: usize,

    /// Sections opened or re-entered
    pub sections_opened: usize,

    /// Scalar values assigned (primary, inline, and sibling)
    pub values_assigned: usize,

    /// Inline or sibling segments skipped for lack of a colon
    pub malformed_segments: usize,

    /// Per-day history records kept after post-processing
    pub history_records: usize,

    /// History entries dropped because they were not sections
    pub history_entries_dropped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines that contributed nothing to the document
    pub fn lines_ignored(&self) -> usize {
        self.blank_lines + self.unstructured_lines
    }
}
