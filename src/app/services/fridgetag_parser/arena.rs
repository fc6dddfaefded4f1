//! Section storage and the indentation stack
//!
//! Sections live in a flat arena and refer to each other by [`NodeId`], so
//! the parse stack can hold handles to open sections while values are still
//! being inserted into them. The arena is turned into an owned
//! [`RawMap`](crate::app::models::RawMap) tree once parsing is done.

use crate::app::models::{RawMap, RawValue};
use indexmap::IndexMap;

/// Handle to a section in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The document root
    pub const ROOT: NodeId = NodeId(0);
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Text(String),
    Section(NodeId),
}

/// Flat storage for every section created during one parse
#[derive(Debug)]
pub struct SectionArena {
    nodes: Vec<IndexMap<String, Slot>>,
}

impl Default for SectionArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionArena {
    /// Create an arena holding only the empty root
    pub fn new() -> Self {
        Self {
            nodes: vec![IndexMap::new()],
        }
    }

    /// Assign a scalar, overwriting whatever the key held
    pub fn set_text(&mut self, node: NodeId, key: &str, value: &str) {
        self.nodes[node.0].insert(key.to_string(), Slot::Text(value.to_string()));
    }

    /// Attach a section under `key`
    ///
    /// When the key already holds a section that section is returned and
    /// further values merge into it; otherwise a fresh section replaces
    /// whatever was there. The flag reports whether an existing section was
    /// reused.
    pub fn attach_section(&mut self, parent: NodeId, key: &str) -> (NodeId, bool) {
        if let Some(Slot::Section(existing)) = self.nodes[parent.0].get(key) {
            return (*existing, true);
        }

        let child = NodeId(self.nodes.len());
        self.nodes.push(IndexMap::new());
        self.nodes[parent.0].insert(key.to_string(), Slot::Section(child));
        (child, false)
    }

    /// Build the owned tree reachable from the root
    ///
    /// Sections that were overwritten by scalars are unreachable and dropped.
    pub fn into_tree(mut self) -> RawMap {
        self.take_section(NodeId::ROOT)
    }

    fn take_section(&mut self, node: NodeId) -> RawMap {
        let slots = std::mem::take(&mut self.nodes[node.0]);
        slots
            .into_iter()
            .map(|(key, slot)| {
                let value = match slot {
                    Slot::Text(text) => RawValue::Text(text),
                    Slot::Section(child) => RawValue::Section(self.take_section(child)),
                };
                (key, value)
            })
            .collect()
    }
}

/// Stack of open sections keyed by the indentation that opened them
///
/// The root sits at the bottom with indentation 0 and is never popped.
#[derive(Debug)]
pub struct ParseStack {
    entries: Vec<(usize, NodeId)>,
}

impl Default for ParseStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseStack {
    /// Create a stack holding only the root
    pub fn new() -> Self {
        Self {
            entries: vec![(0, NodeId::ROOT)],
        }
    }

    /// Close every section opened at `indent` or deeper, keeping the root
    pub fn unwind(&mut self, indent: usize) {
        while self.entries.len() > 1
            && self.entries.last().is_some_and(|(open, _)| *open >= indent)
        {
            self.entries.pop();
        }
    }

    /// Section new keys currently go into
    pub fn current(&self) -> NodeId {
        self.entries
            .last()
            .map(|(_, node)| *node)
            .unwrap_or(NodeId::ROOT)
    }

    /// Open a section at `indent`
    pub fn push(&mut self, indent: usize, node: NodeId) {
        self.entries.push((indent, node));
    }

    /// Nearest open section with indentation strictly below `indent`, else the root
    pub fn enclosing(&self, indent: usize) -> NodeId {
        self.entries
            .iter()
            .rev()
            .find(|(open, _)| *open < indent)
            .map(|(_, node)| *node)
            .unwrap_or(NodeId::ROOT)
    }

    /// Number of open sections, root included
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Indentation widths from bottom to top
    pub fn indents(&self) -> Vec<usize> {
        self.entries.iter().map(|(indent, _)| *indent).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwind_never_pops_root() {
        let mut stack = ParseStack::new();
        stack.push(2, NodeId(1));
        stack.push(4, NodeId(2));

        stack.unwind(0);

        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.current(), NodeId::ROOT);
    }

    #[test]
    fn test_unwind_pops_equal_and_deeper() {
        let mut stack = ParseStack::new();
        stack.push(1, NodeId(1));
        stack.push(2, NodeId(2));
        stack.push(3, NodeId(3));

        stack.unwind(2);

        assert_eq!(stack.indents(), vec![0, 1]);
        assert_eq!(stack.current(), NodeId(1));
    }

    #[test]
    fn test_enclosing_falls_back_to_root() {
        let mut stack = ParseStack::new();
        stack.push(2, NodeId(1));

        assert_eq!(stack.enclosing(3), NodeId(1));
        assert_eq!(stack.enclosing(2), NodeId::ROOT);
        assert_eq!(stack.enclosing(0), NodeId::ROOT);
    }

    #[test]
    fn test_attach_reuses_existing_section() {
        let mut arena = SectionArena::new();
        let (first, reused) = arena.attach_section(NodeId::ROOT, "Conf");
        assert!(!reused);
        arena.set_text(first, "Serial", "1");

        let (second, reused) = arena.attach_section(NodeId::ROOT, "Conf");
        assert!(reused);
        assert_eq!(first, second);
        arena.set_text(second, "PCB", "A");

        let tree = arena.into_tree();
        let conf = tree["Conf"].as_section().unwrap();
        assert_eq!(conf.len(), 2);
    }

    #[test]
    fn test_scalar_replaces_section() {
        let mut arena = SectionArena::new();
        let (node, _) = arena.attach_section(NodeId::ROOT, "Conf");
        arena.set_text(node, "Serial", "1");
        arena.set_text(NodeId::ROOT, "Conf", "none");

        let tree = arena.into_tree();
        assert_eq!(tree["Conf"], RawValue::from("none"));
    }
}
