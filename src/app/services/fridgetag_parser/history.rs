//! History section post-processing
//!
//! The device writes the activation and report-creation timestamps inside the
//! `Hist` block, and each day as a numbered sub-section. This pass moves the
//! two timestamps to the document root and replaces the section with its day
//! records ordered by day number.

use super::diagnostics::{Diagnostic, DiagnosticKind, Severity};
use crate::app::models::{RawDocument, RawMap, RawValue};
use crate::constants::{HISTORY_KEY, RELOCATED_HISTORY_KEYS};

/// What post-processing did to the history section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistorySummary {
    /// Day records kept, in output order
    pub kept: usize,
    /// Entries dropped because they were not sections
    pub dropped: usize,
    /// Events raised along the way
    pub diagnostics: Vec<Diagnostic>,
}

/// Sort key for history entries: numbered days first, in numeric order,
/// then everything else in original order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DayKey {
    Day(u64),
    Unnumbered,
}

impl DayKey {
    fn of(key: &str) -> Self {
        let number = key.trim_end_matches(':');
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return DayKey::Unnumbered;
        }
        number
            .parse::<u64>()
            .map(DayKey::Day)
            .unwrap_or(DayKey::Unnumbered)
    }
}

/// Repair the history section in place
///
/// After this call the document's `Hist` key always holds a list of day
/// records (possibly empty).
pub fn post_process_history(document: &mut RawDocument) -> HistorySummary {
    let mut summary = HistorySummary::default();

    let taken = document
        .root_mut()
        .get_mut(HISTORY_KEY)
        .map(|slot| std::mem::replace(slot, RawValue::Records(Vec::new())));

    let mut section = match taken {
        Some(RawValue::Section(section)) => section,
        Some(RawValue::Records(records)) => {
            // already post-processed
            summary.kept = records.len();
            document.set_history(records);
            return summary;
        }
        Some(other) => {
            summary.diagnostics.push(Diagnostic::document(
                Severity::Warning,
                DiagnosticKind::HistoryNotSection,
                format!(
                    "'{}' found but is a {} rather than a section; using an empty history. Value: {}",
                    HISTORY_KEY,
                    other.kind(),
                    other.render()
                ),
            ));
            document.set_history(Vec::new());
            return summary;
        }
        None => {
            summary.diagnostics.push(Diagnostic::document(
                Severity::Info,
                DiagnosticKind::HistoryMissing,
                format!("'{}' section not found; using an empty history", HISTORY_KEY),
            ));
            document.set_history(Vec::new());
            return summary;
        }
    };

    for key in RELOCATED_HISTORY_KEYS {
        if let Some(value) = section.shift_remove(*key) {
            summary.diagnostics.push(Diagnostic::document(
                Severity::Debug,
                DiagnosticKind::TimestampRelocated,
                format!("Moved '{}' from {} to top level: {}", key, HISTORY_KEY, value.render()),
            ));
            document.root_mut().insert((*key).to_string(), value);
        }
    }

    let records = order_day_records(section, &mut summary);
    summary.kept = records.len();
    document.set_history(records);
    summary
}

/// Order the remaining history entries by day number, dropping non-sections
fn order_day_records(section: RawMap, summary: &mut HistorySummary) -> Vec<RawMap> {
    let mut entries: Vec<(String, RawValue)> = section.into_iter().collect();
    // stable, so unnumbered entries keep their relative order
    entries.sort_by_key(|(key, _)| DayKey::of(key));

    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            RawValue::Section(record) => records.push(record),
            other => {
                summary.dropped += 1;
                summary.diagnostics.push(Diagnostic::document(
                    Severity::Error,
                    DiagnosticKind::HistoryEntryNotSection,
                    format!(
                        "{} item for key '{}' is a {} rather than a day record and was dropped. Value: {}",
                        HISTORY_KEY,
                        key,
                        other.kind(),
                        other.render()
                    ),
                ));
            }
        }
    }
    records
}
