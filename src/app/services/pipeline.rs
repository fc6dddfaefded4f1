//! End-to-end processing of one Fridge-tag export
//!
//! Runs parse, per-record history validation, whole-document validation, and
//! projection in that order. Parser diagnostics and rejected history records
//! are logged here; only a whole-document validation failure stops the run.

use crate::app::services::fridgetag_parser::{ParseStats, parse_to_raw_document};
use crate::app::services::schema::{
    QTagDataOutput, RecordRejection, project, validate_document, validate_history_records,
};
use crate::constants::HISTORY_KEY;
use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, error, info};

/// Byte-order mark some Windows tools prepend to exported text
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Options for one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Log every validated history record at debug level
    pub trace_records: bool,
}

impl PipelineOptions {
    /// Options with per-record tracing switched on or off
    pub fn with_trace_records(trace_records: bool) -> Self {
        Self { trace_records }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedDocument {
    /// The projected output document
    pub document: QTagDataOutput,
    /// History records left out because they failed validation
    pub rejected_records: Vec<RecordRejection>,
    /// Parser statistics
    pub stats: ParseStats,
}

/// Process decoded export text
pub fn process_text(text: &str, options: &PipelineOptions) -> Result<ProcessedDocument> {
    info!("Starting parse of {} bytes", text.len());

    let report = parse_to_raw_document(text);
    report.emit_diagnostics();
    let mut raw = report.document;

    let history = raw.history().map(<[_]>::to_vec).unwrap_or_default();
    info!(
        "Pre-validating {} history records individually",
        history.len()
    );
    let (accepted, rejected_records) = validate_history_records(&history);

    if options.trace_records {
        for (index, record) in accepted.iter().enumerate() {
            debug!("History record {} (input) validated: {:?}", index, record);
        }
    }
    for rejection in &rejected_records {
        error!(
            "Validation failed for {} record {}",
            HISTORY_KEY, rejection.index
        );
        for violation in &rejection.violations {
            error!("  Field: {}", violation.field);
            error!("  Message: {}", violation.message);
            error!("  Input: {}", violation.input);
        }
    }

    if !rejected_records.is_empty() {
        let kept: Vec<_> = history
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !rejected_records.iter().any(|r| r.index == *index))
            .map(|(_, record)| record)
            .collect();
        raw.set_history(kept);
    }
    info!(
        "Finished pre-validating history records, {} kept",
        accepted.len()
    );

    info!("Validating parsed document");
    let input = validate_document(&raw).inspect_err(|err| {
        error!("{}", err);
        for violation in err.violations() {
            error!("  {}", violation);
        }
    })?;

    info!("Projecting validated document");
    let document = project(&input);
    info!(
        "Processed document with {} history records ({} rejected)",
        document.history_records.len(),
        rejected_records.len()
    );

    Ok(ProcessedDocument {
        document,
        rejected_records,
        stats: report.stats,
    })
}

/// Process raw export bytes
///
/// A leading UTF-8 byte-order mark is skipped. Bytes that are not valid
/// UTF-8 are an unexpected failure, not a validation failure.
pub fn process_bytes(bytes: &[u8], options: &PipelineOptions) -> Result<ProcessedDocument> {
    let text = decode(bytes)?;
    process_text(&text, options)
}

/// Decode export bytes as UTF-8, skipping a leading byte-order mark
pub fn decode(bytes: &[u8]) -> Result<String> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8(body.to_vec())
        .map_err(|e| Error::decode("Export is not valid UTF-8 text", e))
}
