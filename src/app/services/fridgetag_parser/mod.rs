//! Hierarchy parser for Fridge-tag text exports
//!
//! The export is a line-oriented, colon-delimited format whose nesting is
//! carried only by leading whitespace. This module rebuilds that nesting into
//! a [`RawDocument`](crate::app::models::RawDocument) and then repairs the
//! history section so that downstream validation sees an ordered list of
//! per-day records.
//!
//! ## Architecture
//!
//! - [`line`] - Line splitting and classification (section, inline pairs, scalar)
//! - [`arena`] - Index-addressed section storage and the indentation stack
//! - [`parser`] - Parse orchestration and the insert/merge/push discipline
//! - [`history`] - History post-processing (timestamp relocation, day ordering)
//! - [`diagnostics`] - Structured parse events and statistics
//!
//! Parsing never fails. Anything the format rules cannot place is reported as
//! a [`Diagnostic`] and skipped; callers decide whether to log, count, or drop
//! those events.
//!
//! ## Usage
//!
//! ```rust
//! use fridgetag_parser::app::services::fridgetag_parser::parse_to_raw_document;
//!
//! let report = parse_to_raw_document("Device: Q-tag CLp\nHist:\n");
//! assert_eq!(report.document.get("Device").and_then(|v| v.as_text()), Some("Q-tag CLp"));
//! assert_eq!(report.document.history().map(|h| h.len()), Some(0));
//! ```

pub mod arena;
pub mod diagnostics;
pub mod history;
pub mod line;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use diagnostics::{Diagnostic, DiagnosticKind, ParseStats, Severity};
pub use history::{HistorySummary, post_process_history};
pub use parser::{ParseReport, parse_to_raw_document};
