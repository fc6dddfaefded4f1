//! Tests for line splitting and classification

use super::super::line::{
    LineKind, Segment, classify, is_section_header_key, physical_lines, split_lines, split_pair,
};

#[test]
fn test_split_lines_measures_indent_and_skips_blanks() {
    let text = "Device: X\n\n   \n  Serial: 1\n\tPCB: A\n";
    let (lines, blank) = split_lines(text);

    assert_eq!(blank, 2);
    assert_eq!(lines.len(), 3);

    assert_eq!(lines[0].number, 1);
    assert_eq!(lines[0].indent, 0);
    assert_eq!(lines[0].content, "Device: X");

    assert_eq!(lines[1].number, 4);
    assert_eq!(lines[1].indent, 2);
    assert_eq!(lines[1].content, "Serial: 1");

    // a tab counts as one whitespace character
    assert_eq!(lines[2].indent, 1);
}

#[test]
fn test_split_lines_handles_crlf() {
    let (lines, blank) = split_lines("A: 1\r\n B: 2\r\n\r\n");
    assert_eq!(blank, 1);
    assert_eq!(lines[0].content, "A: 1");
    assert_eq!(lines[1].content, "B: 2");
    assert_eq!(lines[1].indent, 1);
}

#[test]
fn test_split_lines_handles_bare_carriage_returns() {
    let (lines, blank) = split_lines("Device: Q-tag\rVers: 1\r\r Serial: 7\r");
    assert_eq!(blank, 1);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].content, "Device: Q-tag");
    assert_eq!(lines[1].content, "Vers: 1");
    assert_eq!(lines[2].number, 4);
    assert_eq!(lines[2].indent, 1);
}

#[test]
fn test_physical_lines_break_set() {
    assert_eq!(
        physical_lines("a\nb\r\nc\rd\u{2028}e\x0cf\u{85}g"),
        vec!["a", "b", "c", "d", "e", "f", "g"]
    );
    assert_eq!(physical_lines("a\n\nb\n"), vec!["a", "", "b"]);
    assert_eq!(physical_lines("\r\n"), vec![""]);
    assert!(physical_lines("").is_empty());
}

#[test]
fn test_split_pair_uses_first_colon() {
    assert_eq!(split_pair("TS Actv: 2016-01-19 10:09"), Some(("TS Actv", "2016-01-19 10:09")));
    assert_eq!(split_pair("Hist:"), Some(("Hist", "")));
    assert_eq!(split_pair("  key  :  value "), Some(("key", "value")));
    assert_eq!(split_pair("no colon here"), None);
}

#[test]
fn test_section_header_keys() {
    for key in ["Conf", "Cert", "Alarm", "Int Sensor", "Hist", "Checked", "0", "17", "007"] {
        assert!(is_section_header_key(key), "{} should be a section header", key);
    }
    for key in ["Min T", "Device", "Int Sensor timeout", "", "1a", "-1", "１"] {
        assert!(!is_section_header_key(key), "{} should not be a section header", key);
    }
}

#[test]
fn test_classify_unstructured_line() {
    assert_eq!(classify("just some words"), LineKind::Unstructured);
}

#[test]
fn test_classify_open_section() {
    assert_eq!(classify("Hist:"), LineKind::OpenSection { key: "Hist" });
    assert_eq!(classify("Foo Bar :"), LineKind::OpenSection { key: "Foo Bar" });
}

#[test]
fn test_classify_inline_section() {
    let kind = classify("0: T AL: +30.0, t AL: 600");
    assert_eq!(
        kind,
        LineKind::InlineSection {
            key: "0",
            pairs: vec![
                Segment::Pair { key: "T AL", value: "+30.0" },
                Segment::Pair { key: "t AL", value: "600" },
            ],
        }
    );
}

#[test]
fn test_classify_inline_section_with_malformed_segment() {
    let kind = classify("Checked: TS AM: 08:02, broken, TS PM: 17:15");
    assert_eq!(
        kind,
        LineKind::InlineSection {
            key: "Checked",
            pairs: vec![
                Segment::Pair { key: "TS AM", value: "08:02" },
                Segment::Malformed("broken"),
                Segment::Pair { key: "TS PM", value: "17:15" },
            ],
        }
    );
}

#[test]
fn test_section_key_without_pair_marker_is_scalar() {
    // colon not followed by a space, so this is not an inline list
    assert_eq!(
        classify("Conf: 10:09"),
        LineKind::Scalar {
            key: "Conf",
            value: "10:09",
            siblings: vec![],
        }
    );
    assert_eq!(
        classify("Conf: abc"),
        LineKind::Scalar {
            key: "Conf",
            value: "abc",
            siblings: vec![],
        }
    );
}

#[test]
fn test_classify_scalar_with_siblings() {
    let kind = classify("Min T: +20.4, TS Min T: 10:09");
    assert_eq!(
        kind,
        LineKind::Scalar {
            key: "Min T",
            value: "+20.4",
            siblings: vec![Segment::Pair { key: "TS Min T", value: "10:09" }],
        }
    );
}

#[test]
fn test_classify_scalar_first_token_keeps_colons() {
    let kind = classify("C AccST: 0, t AccST: 0, TS AccST: --:--");
    assert_eq!(
        kind,
        LineKind::Scalar {
            key: "C AccST",
            value: "0",
            siblings: vec![
                Segment::Pair { key: "t AccST", value: "0" },
                Segment::Pair { key: "TS AccST", value: "--:--" },
            ],
        }
    );
}

#[test]
fn test_classify_scalar_with_malformed_sibling() {
    let kind = classify("Vers: 2.1.1, beta");
    assert_eq!(
        kind,
        LineKind::Scalar {
            key: "Vers",
            value: "2.1.1",
            siblings: vec![Segment::Malformed("beta")],
        }
    );
}

#[test]
fn test_comma_without_space_is_not_a_separator() {
    assert_eq!(
        classify("Zone: +1,0"),
        LineKind::Scalar {
            key: "Zone",
            value: "+1,0",
            siblings: vec![],
        }
    );
}
