//! Line splitting and classification
//!
//! Each non-blank line is reduced to its indentation width and trimmed
//! content, then classified by the shape of what follows the first colon.

use crate::constants::{INLINE_PAIR_MARKER, INLINE_SEPARATOR, SECTION_HEADER_KEYS};

/// A non-blank source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Count of leading whitespace characters
    pub indent: usize,
    /// Line content with surrounding whitespace removed
    pub content: &'a str,
}

/// A `key: value` fragment from a comma-separated list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Pair { key: &'a str, value: &'a str },
    Malformed(&'a str),
}

/// Structural meaning of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// No colon anywhere; carries no structure
    Unstructured,

    /// `Key:` with nothing after it opens a nested section
    OpenSection { key: &'a str },

    /// `Key: a: 1, b: 2` for a section-header key opens a section holding the pairs
    InlineSection {
        key: &'a str,
        pairs: Vec<Segment<'a>>,
    },

    /// `Key: value, sibling: x` assigns `value` and hoists the trailing pairs
    Scalar {
        key: &'a str,
        value: &'a str,
        siblings: Vec<Segment<'a>>,
    },
}

/// Whether `c` ends a line (`\r\n` is handled as one break by the caller)
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into physical lines without their terminators
///
/// Breaks on `\n`, `\r\n`, a bare `\r`, and the Unicode line and paragraph
/// separators. A trailing terminator does not produce an extra empty line.
pub fn physical_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..index]);
        start = index + c.len_utf8();
        if c == '\r' && chars.next_if(|(_, next)| *next == '\n').is_some() {
            start += 1;
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Split text into numbered, non-blank lines
///
/// Returns the lines together with the count of blank lines skipped.
pub fn split_lines(text: &str) -> (Vec<SourceLine<'_>>, usize) {
    let mut lines = Vec::new();
    let mut blank = 0;

    for (index, raw) in physical_lines(text).into_iter().enumerate() {
        let content = raw.trim();
        if content.is_empty() {
            blank += 1;
            continue;
        }

        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        lines.push(SourceLine {
            number: index + 1,
            indent,
            content,
        });
    }

    (lines, blank)
}

/// Classify trimmed line content
pub fn classify(content: &str) -> LineKind<'_> {
    let Some((key, value)) = split_pair(content) else {
        return LineKind::Unstructured;
    };

    if value.is_empty() {
        return LineKind::OpenSection { key };
    }

    if is_section_header_key(key) && value.contains(INLINE_PAIR_MARKER) {
        return LineKind::InlineSection {
            key,
            pairs: split_segments(value).collect(),
        };
    }

    let mut parts = split_segments(value);
    let first = value.split(INLINE_SEPARATOR).next().unwrap_or(value).trim();
    // the first token is the value itself, whatever it looks like
    parts.next();

    LineKind::Scalar {
        key,
        value: first,
        siblings: parts.collect(),
    }
}

/// Whether a key introduces a section when followed by inline pairs
pub fn is_section_header_key(key: &str) -> bool {
    let numeric = !key.is_empty() && key.chars().all(|c| c.is_ascii_digit());
    numeric || SECTION_HEADER_KEYS.contains(&key)
}

/// Split on the first colon into trimmed key and value
pub fn split_pair(text: &str) -> Option<(&str, &str)> {
    text.split_once(':')
        .map(|(key, value)| (key.trim(), value.trim()))
}

/// Split a comma-space separated list into segments
fn split_segments(value: &str) -> impl Iterator<Item = Segment<'_>> {
    value.split(INLINE_SEPARATOR).map(|part| {
        let part = part.trim();
        match split_pair(part) {
            Some((key, value)) => Segment::Pair { key, value },
            None => Segment::Malformed(part),
        }
    })
}
