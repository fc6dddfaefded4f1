//! Projection from the input schema to the output schema
//!
//! Every conversion here is total. Numeric fields are coerced to the kind
//! their output field expects when that is lossless and passed through
//! unchanged otherwise.

use super::input::{
    AlarmEntryInput, CertificateInput, CheckedTimestampsInput, ConfigAlarmSettingInput,
    DeviceConfigInput, HistoryRecordInput, IntSensorTimeoutInput, QTagDataInput,
};
use super::output::{
    AlarmEntryOutput, CertificateOutput, CheckedTimestampsOutput, ConfigAlarmSettingOutput,
    DeviceConfigOutput, HistoryRecordOutput, IntSensorTimeoutOutput, InternalSensorOutput,
    QTagDataOutput,
};
use crate::app::models::FieldValue;
use crate::app::services::numeric::normalize_text;
use crate::constants::internal_sensor;
use indexmap::IndexMap;

fn decimal(value: &Option<FieldValue>) -> Option<FieldValue> {
    value.clone().map(FieldValue::into_decimal)
}

fn whole(value: &Option<FieldValue>) -> Option<FieldValue> {
    value.clone().map(FieldValue::into_whole)
}

/// Format minutes as zero-padded `HH:MM`, flooring towards negative infinity
pub fn format_minutes(total_minutes: i64) -> String {
    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);
    format!("{:02}:{:02}", hours, minutes)
}

/// Project a keyed map, treating an empty map as absent
fn project_map<I, O>(
    map: &Option<IndexMap<String, I>>,
    project: impl Fn(&I) -> O,
) -> Option<IndexMap<String, O>> {
    map.as_ref()
        .filter(|entries| !entries.is_empty())
        .map(|entries| {
            entries
                .iter()
                .map(|(key, entry)| (key.clone(), project(entry)))
                .collect()
        })
}

impl AlarmEntryInput {
    pub fn to_output(&self) -> AlarmEntryOutput {
        let accumulated_time = self.t_acc.as_ref().map(|value| match value.to_whole_number() {
            Some(minutes) => FieldValue::Text(format_minutes(minutes)),
            None => value.clone(),
        });

        AlarmEntryOutput {
            accumulated_time,
            alarm_timestamp: self.ts_a.clone(),
            alarm_count: whole(&self.c_a),
        }
    }
}

impl ConfigAlarmSettingInput {
    pub fn to_output(&self) -> ConfigAlarmSettingOutput {
        ConfigAlarmSettingOutput {
            temperature_limit: decimal(&self.temperature_limit),
            time_limit: whole(&self.time_limit),
        }
    }
}

impl IntSensorTimeoutInput {
    pub fn to_output(&self) -> IntSensorTimeoutOutput {
        IntSensorTimeoutOutput {
            accumulated_sensor_timeout: whole(&self.accumulated),
        }
    }
}

impl CheckedTimestampsInput {
    pub fn to_output(&self) -> CheckedTimestampsOutput {
        CheckedTimestampsOutput {
            timestamp_pm: self.ts_pm.clone(),
            timestamp_am: self.ts_am.clone(),
        }
    }
}

impl HistoryRecordInput {
    pub fn to_output(&self) -> HistoryRecordOutput {
        HistoryRecordOutput {
            date: self.date.clone(),
            min_temperature: decimal(&self.min_t),
            timestamp_min_temperature: self.ts_min_t.clone(),
            max_temperature: decimal(&self.max_t),
            timestamp_max_temperature: self.ts_max_t.clone(),
            average_temperature: decimal(&self.avrg_t),
            alarms: project_map(&self.alarm, AlarmEntryInput::to_output),
            internal_sensor_timeout: self
                .int_sensor_timeout
                .as_ref()
                .map(IntSensorTimeoutInput::to_output),
            event_count: whole(&self.events),
            checked_timestamps: self.checked.as_ref().map(CheckedTimestampsInput::to_output),
        }
    }
}

impl DeviceConfigInput {
    /// Rebuild the internal sensor settings from the raw `Int Sensor` pairs
    fn internal_sensor(&self) -> Option<InternalSensorOutput> {
        let pairs = self.int_sensor.as_ref().filter(|pairs| !pairs.is_empty())?;
        Some(InternalSensorOutput {
            timeout: pairs
                .get(internal_sensor::TIMEOUT)
                .and_then(|raw| normalize_text(raw)),
            offset: pairs
                .get(internal_sensor::OFFSET)
                .and_then(|raw| normalize_text(raw)),
        })
    }

    pub fn to_output(&self) -> DeviceConfigOutput {
        DeviceConfigOutput {
            serial_number: self.serial.clone(),
            pcb_version: self.pcb.clone(),
            customer_id: self.cid.clone(),
            lot_number: self.lot.clone(),
            time_zone_offset_hours: decimal(&self.zone),
            measurement_delay_seconds: whole(&self.measurement_delay),
            moving_average_samples: whole(&self.moving_avrg),
            user_alarm_config_flag: whole(&self.user_alarm_config),
            user_clock_config_flag: whole(&self.user_clock_config),
            alarm_indication_mode: whole(&self.alarm_indication),
            temperature_unit: self.temp_unit.clone(),
            alarm_settings: project_map(&self.alarm, ConfigAlarmSettingInput::to_output),
            internal_sensor: self.internal_sensor(),
            report_history_length_days: whole(&self.report_history_length),
            detailed_report_type: whole(&self.det_report),
            use_external_devices_flag: whole(&self.use_ext_devices),
            last_test_result: whole(&self.test_res),
            last_test_timestamp: self.test_ts.clone(),
        }
    }
}

impl CertificateInput {
    pub fn to_output(&self) -> CertificateOutput {
        CertificateOutput {
            version: self.vers.clone(),
            lot_number: self.lot.clone(),
            issuer_name: self.issuer.clone(),
            valid_from_timestamp: self.valid_from.clone(),
            owner_name: self.owner.clone(),
            public_key: self.public_key.clone(),
            signature_certificate: self.sig_cert.clone(),
            signature: self.sig.clone(),
        }
    }
}

impl QTagDataInput {
    pub fn to_output(&self) -> QTagDataOutput {
        let configuration = self.conf.as_ref().map(DeviceConfigInput::to_output);
        let from_config = |read: fn(&DeviceConfigOutput) -> Option<FieldValue>| {
            configuration.as_ref().and_then(read)
        };

        QTagDataOutput {
            device_type: self.device.clone(),
            software_version: self.vers.clone(),
            firmware_version: self.fw_vers.clone(),
            sensor_type: whole(&self.sensor),
            alarm_settings_global: project_map(&self.alarm, ConfigAlarmSettingInput::to_output),
            history_records: self.hist.iter().map(HistoryRecordInput::to_output).collect(),
            activation_timestamp: self.ts_actv.clone(),
            report_creation_timestamp: self.ts_report_creation.clone(),
            certificate: self.cert.as_ref().map(CertificateInput::to_output),
            internal_sensor_info: configuration
                .as_ref()
                .and_then(|config| config.internal_sensor.clone()),
            report_history_length: from_config(|config| config.report_history_length_days.clone()),
            detailed_report_type_info: from_config(|config| config.detailed_report_type.clone()),
            use_external_devices: from_config(|config| config.use_external_devices_flag.clone()),
            last_test_result_info: from_config(|config| config.last_test_result.clone()),
            last_test_timestamp_info: configuration
                .as_ref()
                .and_then(|config| config.last_test_timestamp.clone()),
            configuration,
        }
    }
}

/// Project a validated document into the output shape; never fails
pub fn project(input: &QTagDataInput) -> QTagDataOutput {
    input.to_output()
}
