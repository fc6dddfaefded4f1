//! Test utilities for the hierarchy parser
//!
//! Sample exports shared by the line, parser, and history tests.

use crate::app::models::{RawMap, RawValue};

// Test modules
mod history_tests;
mod line_tests;

/// A short but complete Fridge-tag 2 export with two history days
pub fn create_sample_export() -> String {
    r#"Device: Fridge-tag 2
Vers: 2.1.1
Fw Vers: 212.0
Sensor: 1
Conf:
 Serial: 16009999
 PCB: A
 CID: 0
 Lot: 0
 Zone: +1.0
 Measurement delay: 0
 Moving Avrg: 1
 User Alarm Config: 0
 User Clock Config: 0
 Alarm Indication: 3
 Temp unit: C
 Alarm:
  0: T AL: +30.0, t AL: 600
  1: T AL: -0.5, t AL: 60
 Int Sensor: Timeout: 1, Offset: +0.0
 Report history length: 60
 Det Report: 2
 Use ext devices: 0
 Test Res: 1
 Test TS: 2016-01-19 10:04
Hist:
 TS Actv: 2016-01-19 10:09
 TS Report Creation: 2016-03-21 11:33
 2:
  Date: 2016-01-20
  Min T: +19.8, TS Min T: 03:10
  Max T: +24.1, TS Max T: 15:40
  Avrg T: +21.7
  Alarm:
   0: t Acc: 90, TS A: 15:20, C A: 1
   1: t Acc: 0, TS A: --:--, C A: 0
  Events: 0
  Checked: TS AM: 08:02, TS PM: 17:15
 1:
  Date: 2016-01-19
  Min T: +20.4, TS Min T: 10:09
  Max T: +23.9, TS Max T: 14:09
  Avrg T: +22.1
  Alarm:
   0: t Acc: 0, TS A: --:--, C A: 0
   1: t Acc: 0, TS A: --:--, C A: 0
  Int Sensor timeout:
   C AccST: 0, t AccST: 0, TS AccST: --:--
  Events: 2
Cert:
 Vers: 0
 Lot: 0
 Issuer: Berlinger
 Valid from: 2015-11-01 00:00
 Owner: Berlinger
 Public Key: 04a1b2
 Sig Cert: 30450221
 Sig: 3046022100
"#
    .to_string()
}

/// Borrow a nested section by key path, panicking with the path on failure
pub fn section<'a>(map: &'a RawMap, path: &[&str]) -> &'a RawMap {
    let mut current = map;
    for key in path {
        current = current
            .get(*key)
            .and_then(RawValue::as_section)
            .unwrap_or_else(|| panic!("expected section at {:?} (stopped at '{}')", path, key));
    }
    current
}

/// Borrow a scalar by key
pub fn text<'a>(map: &'a RawMap, key: &str) -> Option<&'a str> {
    map.get(key).and_then(RawValue::as_text)
}

/// Keys of a mapping in insertion order
pub fn keys(map: &RawMap) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}
