//! Two-stage schema for Fridge-tag documents
//!
//! ## Architecture
//!
//! - [`validation`] - Path-tracking validator and the [`FromRaw`] trait
//! - [`input`] - Permissive input types keyed by the export's own names
//! - [`output`] - Strict camelCase output types
//! - [`projection`] - Total input-to-output conversion
//!
//! The raw document is validated in two passes: history records one at a
//! time (a failing record is dropped), then the whole document (any failure
//! is fatal). Validated input is then projected into the output shape.

pub mod input;
pub mod output;
pub mod projection;
pub mod validation;

#[cfg(test)]
pub mod tests;

pub use input::{
    AlarmEntryInput, CertificateInput, CheckedTimestampsInput, ConfigAlarmSettingInput,
    DeviceConfigInput, HistoryRecordInput, IntSensorTimeoutInput, QTagDataInput,
    validate_document, validate_history_records,
};
pub use output::{
    AlarmEntryOutput, CertificateOutput, CheckedTimestampsOutput, ConfigAlarmSettingOutput,
    DeviceConfigOutput, HistoryRecordOutput, IntSensorTimeoutOutput, InternalSensorOutput,
    QTagDataOutput,
};
pub use projection::{format_minutes, project};
pub use validation::{FieldViolation, FromRaw, RecordRejection, ValidationError, Validator};
