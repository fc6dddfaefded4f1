//! Test helpers for the schema layer

use crate::app::models::{RawDocument, RawMap, RawValue};

// Test modules
mod input_tests;

/// Build a section from text pairs
pub fn pairs(entries: &[(&str, &str)]) -> RawMap {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), RawValue::from(*value)))
        .collect()
}

/// Build a section from arbitrary values
pub fn section(entries: Vec<(&str, RawValue)>) -> RawMap {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Build a document root with the given history records
pub fn document(mut root: RawMap, history: Vec<RawMap>) -> RawDocument {
    root.insert("Hist".to_string(), RawValue::Records(history));
    RawDocument::new(root)
}

/// A history day in the shape the parser produces
pub fn history_day(date: &str) -> RawMap {
    let alarm = section(vec![
        ("0", RawValue::Section(pairs(&[("t Acc", "90"), ("TS A", "15:20"), ("C A", "1")]))),
        ("1", RawValue::Section(pairs(&[("t Acc", "0"), ("TS A", "--:--"), ("C A", "0")]))),
    ]);

    let mut record = pairs(&[
        ("Date", date),
        ("Min T", "+19.8"),
        ("TS Min T", "03:10"),
        ("Max T", "+24"),
        ("TS Max T", "15:40"),
        ("Avrg T", "---"),
    ]);
    record.insert("Alarm".to_string(), RawValue::Section(alarm));
    record.insert(
        "Int Sensor timeout".to_string(),
        RawValue::Section(pairs(&[("C AccST", "0"), ("t AccST", "12")])),
    );
    record.insert("Events".to_string(), RawValue::from("2"));
    record.insert(
        "Checked".to_string(),
        RawValue::Section(pairs(&[("TS AM", "08:02"), ("TS PM", "17:15")])),
    );
    record
}

/// A `Conf` section in the shape the parser produces
pub fn device_config() -> RawMap {
    let mut conf = pairs(&[
        ("Serial", "16009999"),
        ("PCB", "A"),
        ("CID", "0"),
        ("Lot", "0"),
        ("Zone", "+1"),
        ("Measurement delay", "0"),
        ("Moving Avrg", "1"),
        ("User Alarm Config", "0"),
        ("User Clock Config", "0"),
        ("Alarm Indication", "3"),
        ("Temp unit", "C"),
    ]);
    conf.insert(
        "Alarm".to_string(),
        RawValue::Section(section(vec![
            ("0", RawValue::Section(pairs(&[("T AL", "+30"), ("t AL", "600")]))),
            ("1", RawValue::Section(pairs(&[("T AL", "-0.5"), ("t AL", "60")]))),
        ])),
    );
    conf.insert(
        "Int Sensor".to_string(),
        RawValue::Section(pairs(&[("Timeout", "1"), ("Offset", "+0.0")])),
    );
    for (key, value) in [
        ("Report history length", "60"),
        ("Det Report", "2"),
        ("Use ext devices", "0"),
        ("Test Res", "1"),
        ("Test TS", "2016-01-19 10:04"),
    ] {
        conf.insert(key.to_string(), RawValue::from(value));
    }
    conf
}
