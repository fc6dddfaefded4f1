//! Tests for the input schema

use super::*;
use crate::app::models::FieldValue;
use crate::app::services::schema::{validate_document, validate_history_records};

#[test]
fn test_history_record_fields() {
    let (records, rejected) = validate_history_records(&[history_day("2016-01-19")]);

    assert!(rejected.is_empty());
    let record = &records[0];
    assert_eq!(record.date.as_deref(), Some("2016-01-19"));
    assert_eq!(record.min_t, Some(FieldValue::Decimal(19.8)));
    assert_eq!(record.max_t, Some(FieldValue::Integer(24)));
    assert_eq!(record.avrg_t, None);
    assert_eq!(record.events, Some(FieldValue::Integer(2)));

    let alarms = record.alarm.as_ref().expect("alarms");
    assert_eq!(alarms.len(), 2);
    assert_eq!(alarms["0"].t_acc, Some(FieldValue::Integer(90)));
    assert_eq!(alarms["1"].ts_a.as_deref(), Some("--:--"));

    let timeout = record.int_sensor_timeout.as_ref().expect("timeout");
    assert_eq!(timeout.accumulated, Some(FieldValue::Integer(12)));
    assert_eq!(
        record.checked.as_ref().and_then(|c| c.ts_pm.as_deref()),
        Some("17:15")
    );
}

#[test]
fn test_per_record_isolation() {
    let mut bad = history_day("2016-01-20");
    bad.insert("Checked".to_string(), RawValue::from("08:02"));

    let raw = vec![history_day("2016-01-19"), bad, history_day("2016-01-21")];
    let (records, rejected) = validate_history_records(&raw);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date.as_deref(), Some("2016-01-19"));
    assert_eq!(records[1].date.as_deref(), Some("2016-01-21"));

    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].index, 1);
    assert_eq!(rejected[0].violations.len(), 1);
    assert_eq!(rejected[0].violations[0].field, "Hist.1.Checked");
    assert_eq!(rejected[0].violations[0].input, "08:02");
}

#[test]
fn test_record_with_several_problems_reports_all() {
    let mut bad = history_day("2016-01-20");
    bad.insert("Date".to_string(), RawValue::Section(RawMap::new()));
    bad.insert("Int Sensor timeout".to_string(), RawValue::from("t AccST: 0"));

    let (records, rejected) = validate_history_records(&[bad]);

    assert!(records.is_empty());
    let fields: Vec<&str> = rejected[0]
        .violations
        .iter()
        .map(|v| v.field.as_str())
        .collect();
    assert_eq!(fields, vec!["Hist.0.Date", "Hist.0.Int Sensor timeout"]);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let mut day = history_day("2016-01-19");
    day.insert("Whatever".to_string(), RawValue::Section(RawMap::new()));

    let (records, rejected) = validate_history_records(&[day]);
    assert_eq!(records.len(), 1);
    assert!(rejected.is_empty());
}

#[test]
fn test_validate_complete_document() {
    let mut root = pairs(&[
        ("Device", "Fridge-tag 2"),
        ("Vers", "2.1.1"),
        ("Fw Vers", "212.0"),
        ("Sensor", "1"),
        ("TS Actv", "2016-01-19 10:09"),
    ]);
    root.insert("Conf".to_string(), RawValue::Section(device_config()));
    root.insert(
        "Cert".to_string(),
        RawValue::Section(pairs(&[("Vers", "0"), ("Issuer", "Berlinger"), ("Sig", "30")])),
    );
    let raw = document(root, vec![history_day("a"), history_day("b")]);

    let input = validate_document(&raw).expect("valid document");

    assert_eq!(input.device.as_deref(), Some("Fridge-tag 2"));
    assert_eq!(input.fw_vers.as_deref(), Some("212.0"));
    assert_eq!(input.sensor, Some(FieldValue::Integer(1)));
    assert_eq!(input.hist.len(), 2);
    assert_eq!(input.ts_actv.as_deref(), Some("2016-01-19 10:09"));
    assert_eq!(input.ts_report_creation, None);

    let conf = input.conf.expect("configuration");
    assert_eq!(conf.serial.as_deref(), Some("16009999"));
    assert_eq!(conf.zone, Some(FieldValue::Integer(1)));
    assert_eq!(conf.alarm.as_ref().map(|a| a.len()), Some(2));
    assert_eq!(
        conf.int_sensor.as_ref().and_then(|s| s.get("Offset")).map(String::as_str),
        Some("+0.0")
    );
    assert_eq!(input.cert.and_then(|c| c.issuer).as_deref(), Some("Berlinger"));
}

#[test]
fn test_scalar_configuration_is_fatal() {
    let root = pairs(&[("Device", "Q-tag CLp"), ("Conf", "abc")]);
    let raw = document(root, vec![]);

    let err = validate_document(&raw).unwrap_err();

    assert_eq!(err.model(), "QTagDataInput");
    assert_eq!(err.violations().len(), 1);
    assert_eq!(err.violations()[0].field, "Conf");
    assert_eq!(
        err.violations()[0].message,
        "Input should be a valid dictionary or instance of DeviceConfigInput"
    );
    assert_eq!(err.violations()[0].input, "abc");
}

#[test]
fn test_history_must_be_a_list() {
    let root = section(vec![("Hist", RawValue::Section(RawMap::new()))]);
    let err = validate_document(&RawDocument::new(root)).unwrap_err();

    assert_eq!(err.violations()[0].field, "Hist");
    assert_eq!(err.violations()[0].message, "Input should be a valid list");
}

#[test]
fn test_missing_history_defaults_to_empty() {
    let root = pairs(&[("Device", "Q-tag CLp")]);
    let input = validate_document(&RawDocument::new(root)).expect("valid document");

    assert!(input.hist.is_empty());
}

#[test]
fn test_global_alarm_map() {
    let mut root = RawMap::new();
    root.insert(
        "Alarm".to_string(),
        RawValue::Section(section(vec![(
            "0",
            RawValue::Section(pairs(&[("T AL", "+8.0"), ("t AL", "---")])),
        )])),
    );

    let input = validate_document(&document(root, vec![])).expect("valid document");
    let global = input.alarm.expect("global alarms");

    assert_eq!(global["0"].temperature_limit, Some(FieldValue::Decimal(8.0)));
    assert_eq!(global["0"].time_limit, None);
}
