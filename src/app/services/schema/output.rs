//! Output schema: the public, camelCase result document
//!
//! Absent fields are omitted from the serialized form, never written as
//! `null`. The one exception is `historyRecords`, which is always present.

use crate::app::models::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlarmEntryOutput {
    /// Accumulated time as `HH:MM`, or the original value when it is not a whole number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulated_time: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_count: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigAlarmSettingOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_limit: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntSensorTimeoutOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accumulated_sensor_timeout: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckedTimestampsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_pm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_am: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryRecordOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_min_temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_max_temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_temperature: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarms: Option<IndexMap<String, AlarmEntryOutput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_sensor_timeout: Option<IntSensorTimeoutOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_count: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_timestamps: Option<CheckedTimestampsOutput>,
}

/// Internal sensor settings rebuilt from the `Int Sensor` pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalSensorOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfigOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcb_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone_offset_hours: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_delay_seconds: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average_samples: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_alarm_config_flag: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_clock_config_flag: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_indication_mode: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_settings: Option<IndexMap<String, ConfigAlarmSettingOutput>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_sensor: Option<InternalSensorOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_history_length_days: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_report_type: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_external_devices_flag: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_test_result: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_test_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_certificate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// The projected document
///
/// The `*Info`-style fields at the bottom duplicate values from
/// `configuration` for consumers that only read the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QTagDataOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub software_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<DeviceConfigOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_settings_global: Option<IndexMap<String, ConfigAlarmSettingOutput>>,
    pub history_records: Vec<HistoryRecordOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_creation_timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_sensor_info: Option<InternalSensorOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_history_length: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_report_type_info: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_external_devices: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_test_result_info: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_test_timestamp_info: Option<String>,
}
