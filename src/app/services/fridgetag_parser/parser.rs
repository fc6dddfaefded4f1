//! Core hierarchy parser implementation
//!
//! Walks the export line by line, keeping a stack of open sections keyed by
//! indentation. Every insert first unwinds the stack to the section the new
//! key belongs to; inserting a section then opens it at the line's
//! indentation.

use super::arena::{NodeId, ParseStack, SectionArena};
use super::diagnostics::{Diagnostic, DiagnosticKind, ParseStats, Severity};
use super::history::post_process_history;
use super::line::{LineKind, Segment, SourceLine, classify, physical_lines, split_lines};
use crate::app::models::RawDocument;
use serde::Serialize;

/// Result of parsing one export
#[derive(Debug, Clone, Serialize)]
pub struct ParseReport {
    /// Raw document with the history section already post-processed
    pub document: RawDocument,

    /// Everything that was skipped or repaired, in source order
    pub diagnostics: Vec<Diagnostic>,

    /// Line-level statistics
    pub stats: ParseStats,
}

impl ParseReport {
    /// Forward all diagnostics to the tracing subscriber
    pub fn emit_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            diagnostic.emit();
        }
    }

    /// Diagnostics at or above a severity
    pub fn diagnostics_at_least(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.severity >= severity)
    }
}

/// Parse the full text of a Fridge-tag export
///
/// Never fails: malformed lines are skipped and reported in the returned
/// diagnostics. The history section is post-processed before returning, so
/// the document's `Hist` key always holds a (possibly empty) list.
pub fn parse_to_raw_document(text: &str) -> ParseReport {
    let mut builder = HierarchyBuilder::new();
    builder.stats.total_lines = physical_lines(text).len();

    let (lines, blank) = split_lines(text);
    builder.stats.blank_lines = blank;

    for line in &lines {
        builder.consume(line);
    }

    let HierarchyBuilder {
        arena,
        mut diagnostics,
        mut stats,
        ..
    } = builder;

    let mut document = RawDocument::new(arena.into_tree());
    let summary = post_process_history(&mut document);
    stats.history_records = summary.kept;
    stats.history_entries_dropped = summary.dropped;
    diagnostics.extend(summary.diagnostics);

    ParseReport {
        document,
        diagnostics,
        stats,
    }
}

/// Mutable state for one parse call
struct HierarchyBuilder {
    arena: SectionArena,
    stack: ParseStack,
    diagnostics: Vec<Diagnostic>,
    stats: ParseStats,
}

impl HierarchyBuilder {
    fn new() -> Self {
        Self {
            arena: SectionArena::new(),
            stack: ParseStack::new(),
            diagnostics: Vec::new(),
            stats: ParseStats::new(),
        }
    }

    fn consume(&mut self, line: &SourceLine<'_>) {
        match classify(line.content) {
            LineKind::Unstructured => {
                self.stats.unstructured_lines += 1;
                self.diagnostics.push(Diagnostic::at_line(
                    line.number,
                    Severity::Warning,
                    DiagnosticKind::MissingColon,
                    format!("Line without colon ignored: '{}'", line.content),
                ));
            }
            LineKind::OpenSection { key } => {
                self.open_section(line.indent, key);
            }
            LineKind::InlineSection { key, pairs } => {
                let section = self.open_section(line.indent, key);
                for segment in pairs {
                    match segment {
                        Segment::Pair { key: sub_key, value } => {
                            self.arena.set_text(section, sub_key, value);
                            self.stats.values_assigned += 1;
                        }
                        Segment::Malformed(text) => {
                            self.malformed(
                                line.number,
                                DiagnosticKind::MalformedSegment,
                                format!(
                                    "Malformed segment '{}' in value for section '{}', expected key:value",
                                    text, key
                                ),
                            );
                        }
                    }
                }
            }
            LineKind::Scalar {
                key,
                value,
                siblings,
            } => {
                self.assign(line.indent, key, value);

                if siblings.is_empty() {
                    return;
                }

                let target = self.stack.enclosing(line.indent);
                for segment in siblings {
                    match segment {
                        Segment::Pair {
                            key: sibling,
                            value,
                        } => {
                            self.arena.set_text(target, sibling, value);
                            self.stats.values_assigned += 1;
                        }
                        Segment::Malformed(text) => {
                            self.malformed(
                                line.number,
                                DiagnosticKind::MalformedSibling,
                                format!(
                                    "Malformed sibling segment '{}' for '{}', expected key:value",
                                    text, key
                                ),
                            );
                        }
                    }
                }
            }
        }
    }

    /// Insert a section for `key` at `indent` and make it current
    fn open_section(&mut self, indent: usize, key: &str) -> NodeId {
        self.stack.unwind(indent);
        let parent = self.stack.current();
        let (section, _reused) = self.arena.attach_section(parent, key);
        self.stack.push(indent, section);
        self.stats.sections_opened += 1;
        section
    }

    /// Insert a scalar for `key` at `indent`
    fn assign(&mut self, indent: usize, key: &str, value: &str) {
        self.stack.unwind(indent);
        let parent = self.stack.current();
        self.arena.set_text(parent, key, value);
        self.stats.values_assigned += 1;
    }

    fn malformed(&mut self, line: usize, kind: DiagnosticKind, message: String) {
        self.stats.malformed_segments += 1;
        self.diagnostics
            .push(Diagnostic::at_line(line, Severity::Warning, kind, message));
    }
}
