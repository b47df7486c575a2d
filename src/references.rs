//! Reference scanning: which scoped symbols mention which other symbols.
//!
//! For every extracted scope, the source slice is stripped of comments and
//! string literals, then searched for every other scoped name as a whole
//! word. The search is an explicit word-boundary substring scan (boundaries
//! are start/end of text or a non-identifier character), so `Foobar` never
//! counts as a mention of `Foo`. Quadratic in symbol count; symbol counts
//! are in the hundreds, not a scalability target.

use std::collections::BTreeSet;
use std::collections::HashMap;

use crate::lexical::strip;
use crate::scan::is_ident_byte;
use crate::scopes::ScopeMap;

/// Directed reference graph: symbol -> set of referenced symbols.
///
/// Irreflexive by construction. Nodes iterate in scope-discovery order;
/// each node's outgoing edges are alphabetically ordered.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    entries: Vec<(String, BTreeSet<String>)>,
    index: HashMap<String, usize>,
}

impl ReferenceGraph {
    fn add_node(&mut self, name: &str) {
        if !self.index.contains_key(name) {
            self.index.insert(name.to_string(), self.entries.len());
            self.entries.push((name.to_string(), BTreeSet::new()));
        }
    }

    fn add_edge(&mut self, from: &str, to: &str) {
        if let Some(&i) = self.index.get(from) {
            self.entries[i].1.insert(to.to_string());
        }
    }

    /// Outgoing references for a symbol, if it has a node.
    pub fn references_of(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Iterate `(name, references)` in scope-discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(name, refs)| (name.as_str(), refs))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Whole-word occurrence test.
///
/// `needle` must appear with a non-identifier byte (or text boundary) on
/// each side.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    for (at, _) in haystack.match_indices(needle) {
        let before_ok = at == 0 || !is_ident_byte(bytes[at - 1]);
        let after = at + needle.len();
        let after_ok = after >= bytes.len() || !is_ident_byte(bytes[after]);
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// Build the reference graph for every scope over the full source text.
pub fn scan_references(source: &str, scopes: &ScopeMap) -> ReferenceGraph {
    let mut graph = ReferenceGraph::default();
    for name in scopes.names() {
        graph.add_node(name);
    }

    for (name, span) in scopes.iter() {
        let body = strip(&source[span.start..span.end]);
        for candidate in scopes.names() {
            if candidate == name {
                continue;
            }
            if contains_word(&body, candidate) {
                graph.add_edge(name, candidate);
            }
        }
    }

    tracing::debug!(
        nodes = graph.len(),
        edges = graph.iter().map(|(_, refs)| refs.len()).sum::<usize>(),
        "scanned references"
    );
    graph
}

// ============================================================================
// Tests
// ============================================================================
