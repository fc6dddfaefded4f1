//! Input schema: a tolerant typed view over the raw document
//!
//! Every field is optional and read by its key in the export. Numeric fields
//! are normalized as they are read; unknown keys are ignored.

use super::validation::{FromRaw, RecordRejection, ValidationError, Validator};
use crate::app::models::{FieldValue, RawDocument, RawMap};
use crate::constants::HISTORY_KEY;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// One alarm zone's daily figures inside a history record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlarmEntryInput {
    /// `t Acc`: accumulated time out of range, in minutes
    pub t_acc: Option<FieldValue>,
    /// `TS A`: time the alarm triggered
    pub ts_a: Option<String>,
    /// `C A`: alarm count
    pub c_a: Option<FieldValue>,
}

impl FromRaw for AlarmEntryInput {
    const NAME: &'static str = "AlarmEntryInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            t_acc: v.numeric(map, "t Acc"),
            ts_a: v.text(map, "TS A"),
            c_a: v.numeric(map, "C A"),
        }
    }
}

/// One configured alarm zone
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigAlarmSettingInput {
    /// `T AL`: temperature limit
    pub temperature_limit: Option<FieldValue>,
    /// `t AL`: time limit
    pub time_limit: Option<FieldValue>,
}

impl FromRaw for ConfigAlarmSettingInput {
    const NAME: &'static str = "ConfigAlarmSettingInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            temperature_limit: v.numeric(map, "T AL"),
            time_limit: v.numeric(map, "t AL"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntSensorTimeoutInput {
    /// `t AccST`
    pub accumulated: Option<FieldValue>,
}

impl FromRaw for IntSensorTimeoutInput {
    const NAME: &'static str = "IntSensorTimeoutInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            accumulated: v.numeric(map, "t AccST"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckedTimestampsInput {
    /// `TS PM`
    pub ts_pm: Option<String>,
    /// `TS AM`
    pub ts_am: Option<String>,
}

impl FromRaw for CheckedTimestampsInput {
    const NAME: &'static str = "CheckedTimestampsInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            ts_pm: v.text(map, "TS PM"),
            ts_am: v.text(map, "TS AM"),
        }
    }
}

/// One calendar day of the history section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryRecordInput {
    pub date: Option<String>,
    pub min_t: Option<FieldValue>,
    pub ts_min_t: Option<String>,
    pub max_t: Option<FieldValue>,
    pub ts_max_t: Option<String>,
    pub avrg_t: Option<FieldValue>,
    pub alarm: Option<IndexMap<String, AlarmEntryInput>>,
    pub int_sensor_timeout: Option<IntSensorTimeoutInput>,
    pub events: Option<FieldValue>,
    pub checked: Option<CheckedTimestampsInput>,
}

impl FromRaw for HistoryRecordInput {
    const NAME: &'static str = "HistoryRecordInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            date: v.text(map, "Date"),
            min_t: v.numeric(map, "Min T"),
            ts_min_t: v.text(map, "TS Min T"),
            max_t: v.numeric(map, "Max T"),
            ts_max_t: v.text(map, "TS Max T"),
            avrg_t: v.numeric(map, "Avrg T"),
            alarm: v.section_map(map, "Alarm"),
            int_sensor_timeout: v.section(map, "Int Sensor timeout"),
            events: v.numeric(map, "Events"),
            checked: v.section(map, "Checked"),
        }
    }
}

/// The `Conf` section
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceConfigInput {
    pub serial: Option<String>,
    pub pcb: Option<String>,
    pub cid: Option<String>,
    pub lot: Option<String>,
    pub zone: Option<FieldValue>,
    pub measurement_delay: Option<FieldValue>,
    pub moving_avrg: Option<FieldValue>,
    pub user_alarm_config: Option<FieldValue>,
    pub user_clock_config: Option<FieldValue>,
    pub alarm_indication: Option<FieldValue>,
    pub temp_unit: Option<String>,
    pub alarm: Option<IndexMap<String, ConfigAlarmSettingInput>>,
    /// `Int Sensor`, kept as raw text pairs (`Timeout`, `Offset`)
    pub int_sensor: Option<IndexMap<String, String>>,
    pub report_history_length: Option<FieldValue>,
    pub det_report: Option<FieldValue>,
    pub use_ext_devices: Option<FieldValue>,
    pub test_res: Option<FieldValue>,
    pub test_ts: Option<String>,
}

impl FromRaw for DeviceConfigInput {
    const NAME: &'static str = "DeviceConfigInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            serial: v.text(map, "Serial"),
            pcb: v.text(map, "PCB"),
            cid: v.text(map, "CID"),
            lot: v.text(map, "Lot"),
            zone: v.numeric(map, "Zone"),
            measurement_delay: v.numeric(map, "Measurement delay"),
            moving_avrg: v.numeric(map, "Moving Avrg"),
            user_alarm_config: v.numeric(map, "User Alarm Config"),
            user_clock_config: v.numeric(map, "User Clock Config"),
            alarm_indication: v.numeric(map, "Alarm Indication"),
            temp_unit: v.text(map, "Temp unit"),
            alarm: v.section_map(map, "Alarm"),
            int_sensor: v.string_map(map, "Int Sensor"),
            report_history_length: v.numeric(map, "Report history length"),
            det_report: v.numeric(map, "Det Report"),
            use_ext_devices: v.numeric(map, "Use ext devices"),
            test_res: v.numeric(map, "Test Res"),
            test_ts: v.text(map, "Test TS"),
        }
    }
}

/// The `Cert` section, copied through without interpretation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CertificateInput {
    pub vers: Option<String>,
    pub lot: Option<String>,
    pub issuer: Option<String>,
    pub valid_from: Option<String>,
    pub owner: Option<String>,
    pub public_key: Option<String>,
    pub sig_cert: Option<String>,
    pub sig: Option<String>,
}

impl FromRaw for CertificateInput {
    const NAME: &'static str = "CertificateInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            vers: v.text(map, "Vers"),
            lot: v.text(map, "Lot"),
            issuer: v.text(map, "Issuer"),
            valid_from: v.text(map, "Valid from"),
            owner: v.text(map, "Owner"),
            public_key: v.text(map, "Public Key"),
            sig_cert: v.text(map, "Sig Cert"),
            sig: v.text(map, "Sig"),
        }
    }
}

/// The whole export
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QTagDataInput {
    pub device: Option<String>,
    pub vers: Option<String>,
    pub fw_vers: Option<String>,
    pub sensor: Option<FieldValue>,
    pub conf: Option<DeviceConfigInput>,
    /// Top-level `Alarm`, distinct from `Conf.Alarm`
    pub alarm: Option<IndexMap<String, ConfigAlarmSettingInput>>,
    pub hist: Vec<HistoryRecordInput>,
    pub ts_actv: Option<String>,
    pub ts_report_creation: Option<String>,
    pub cert: Option<CertificateInput>,
}

impl FromRaw for QTagDataInput {
    const NAME: &'static str = "QTagDataInput";

    fn from_raw(map: &RawMap, v: &mut Validator) -> Self {
        Self {
            device: v.text(map, "Device"),
            vers: v.text(map, "Vers"),
            fw_vers: v.text(map, "Fw Vers"),
            sensor: v.numeric(map, "Sensor"),
            conf: v.section(map, "Conf"),
            alarm: v.section_map(map, "Alarm"),
            hist: v.records(map, "Hist").unwrap_or_default(),
            ts_actv: v.text(map, "TS Actv"),
            ts_report_creation: v.text(map, "TS Report Creation"),
            cert: v.section(map, "Cert"),
        }
    }
}

/// Validate history records one by one
///
/// Records that fail are left out of the first list and reported in the
/// second with their position; a failing record never affects the others.
pub fn validate_history_records(
    records: &[RawMap],
) -> (Vec<HistoryRecordInput>, Vec<RecordRejection>) {
    let mut accepted = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let mut validator = Validator::at(format!("{}.{}", HISTORY_KEY, index));
        let parsed = HistoryRecordInput::from_raw(record, &mut validator);

        match validator.finish(HistoryRecordInput::NAME, parsed) {
            Ok(parsed) => {
                debug!("History record {} validated", index);
                accepted.push(parsed);
            }
            Err(err) => rejected.push(RecordRejection {
                index,
                violations: err.into_violations(),
            }),
        }
    }

    (accepted, rejected)
}

/// Validate the assembled document
///
/// This is the single fatal validation point: any violation rejects the
/// whole document, and the error lists every violated field.
pub fn validate_document(document: &RawDocument) -> Result<QTagDataInput, ValidationError> {
    let mut validator = Validator::new();
    let parsed = QTagDataInput::from_raw(document.root(), &mut validator);
    validator.finish(QTagDataInput::NAME, parsed)
}
