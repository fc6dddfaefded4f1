//! Tests for history post-processing

use super::*;
use crate::app::models::RawDocument;
use crate::app::services::fridgetag_parser::{DiagnosticKind, Severity, post_process_history};

fn day(date: &str) -> RawValue {
    let mut record = RawMap::new();
    record.insert("Date".to_string(), RawValue::from(date));
    RawValue::Section(record)
}

fn document_with_history(entries: Vec<(&str, RawValue)>) -> RawDocument {
    let history: RawMap = entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

    let mut root = RawMap::new();
    root.insert("Device".to_string(), RawValue::from("Fridge-tag 2"));
    root.insert("Hist".to_string(), RawValue::Section(history));
    root.insert("Cert".to_string(), RawValue::Section(RawMap::new()));
    RawDocument::new(root)
}

fn dates(document: &RawDocument) -> Vec<&str> {
    document
        .history()
        .expect("history list")
        .iter()
        .map(|record| text(record, "Date").unwrap_or("<none>"))
        .collect()
}

#[test]
fn test_days_sorted_numerically() {
    let mut document =
        document_with_history(vec![("2", day("b")), ("1", day("a")), ("10", day("c"))]);

    let summary = post_process_history(&mut document);

    assert_eq!(dates(&document), vec!["a", "b", "c"]);
    assert_eq!(summary.kept, 3);
    assert_eq!(summary.dropped, 0);
}

#[test]
fn test_trailing_colon_is_ignored_when_sorting() {
    let mut document =
        document_with_history(vec![("10:", day("c")), ("2:", day("b")), ("1:", day("a"))]);

    post_process_history(&mut document);

    assert_eq!(dates(&document), vec!["a", "b", "c"]);
}

#[test]
fn test_non_numeric_keys_sort_last_in_original_order() {
    let mut document = document_with_history(vec![
        ("abc", day("x")),
        ("3", day("c")),
        ("zzz", day("y")),
        ("1", day("a")),
        ("99999999999999999999999", day("z")),
    ]);

    let summary = post_process_history(&mut document);

    assert_eq!(dates(&document), vec!["a", "c", "x", "y", "z"]);
    assert_eq!(summary.kept, 5);
}

#[test]
fn test_timestamps_move_to_root() {
    let mut document = document_with_history(vec![
        ("TS Actv", RawValue::from("2016-01-19 10:09")),
        ("1", day("a")),
        ("TS Report Creation", RawValue::from("2016-03-21 11:33")),
    ]);

    let summary = post_process_history(&mut document);
    let root = document.root();

    assert_eq!(
        keys(root),
        vec!["Device", "Hist", "Cert", "TS Actv", "TS Report Creation"]
    );
    assert_eq!(text(root, "TS Actv"), Some("2016-01-19 10:09"));
    assert_eq!(dates(&document), vec!["a"]);
    assert_eq!(
        summary
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::TimestampRelocated)
            .count(),
        2
    );
}

#[test]
fn test_relocated_timestamp_replaces_existing_root_value() {
    let mut document = document_with_history(vec![("TS Actv", RawValue::from("new"))]);
    document
        .root_mut()
        .insert("TS Actv".to_string(), RawValue::from("old"));

    post_process_history(&mut document);

    assert_eq!(text(document.root(), "TS Actv"), Some("new"));
}

#[test]
fn test_non_section_entries_are_dropped() {
    let mut document = document_with_history(vec![
        ("1", day("a")),
        ("2", RawValue::from("oops")),
        ("3", day("c")),
    ]);

    let summary = post_process_history(&mut document);

    assert_eq!(dates(&document), vec!["a", "c"]);
    assert_eq!(summary.kept, 2);
    assert_eq!(summary.dropped, 1);

    let diagnostic = &summary.diagnostics[0];
    assert_eq!(diagnostic.severity, Severity::Error);
    assert_eq!(diagnostic.kind, DiagnosticKind::HistoryEntryNotSection);
    assert!(diagnostic.message.contains("'2'"));
    assert!(diagnostic.message.contains("oops"));
}

#[test]
fn test_missing_history_becomes_empty_list() {
    let mut root = RawMap::new();
    root.insert("Device".to_string(), RawValue::from("X"));
    let mut document = RawDocument::new(root);

    let summary = post_process_history(&mut document);

    assert_eq!(document.history(), Some(&[][..]));
    assert_eq!(summary.diagnostics.len(), 1);
    assert_eq!(summary.diagnostics[0].severity, Severity::Info);
    assert_eq!(summary.diagnostics[0].kind, DiagnosticKind::HistoryMissing);
}

#[test]
fn test_scalar_history_becomes_empty_list() {
    let mut root = RawMap::new();
    root.insert("Hist".to_string(), RawValue::from("none"));
    root.insert("Device".to_string(), RawValue::from("X"));
    let mut document = RawDocument::new(root);

    let summary = post_process_history(&mut document);

    assert_eq!(keys(document.root()), vec!["Hist", "Device"]);
    assert_eq!(document.history(), Some(&[][..]));
    assert_eq!(summary.diagnostics[0].severity, Severity::Warning);
    assert_eq!(summary.diagnostics[0].kind, DiagnosticKind::HistoryNotSection);
}

#[test]
fn test_parsed_history_with_unnumbered_section() {
    let input = "Hist:\n 2:\n  Date: b\n notes:\n  Date: n\n 1:\n  Date: a\n";
    let report = crate::app::services::fridgetag_parser::parse_to_raw_document(input);

    assert_eq!(dates(&report.document), vec!["a", "b", "n"]);
}

#[test]
fn test_post_processing_twice_keeps_records() {
    let mut document = document_with_history(vec![("2", day("b")), ("1", day("a"))]);

    post_process_history(&mut document);
    let summary = post_process_history(&mut document);

    assert_eq!(dates(&document), vec!["a", "b"]);
    assert_eq!(summary.kept, 2);
    assert!(summary.diagnostics.is_empty());
}
