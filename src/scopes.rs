//! Scope extraction: half-open byte intervals for top-level named symbols.
//!
//! A construct's end offset is not known until the next top-level construct
//! begins, so the extractor is a small state machine with one state
//! variable, the currently open scope name. Class and def declarations stay
//! open until the next class/def/assignment (or end of file) closes them;
//! assignments are self-terminating at the end of their own line and are
//! only tracked when their target is a registered name.

use std::collections::HashMap;

use crate::registry::NameRegistry;
use crate::scan::TopLevelMatch;

/// Half-open byte interval `[start, end)` attributed to one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSpan {
    pub start: usize,
    pub end: usize,
}

impl ScopeSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Mapping from symbol name to its scope interval, iterated in discovery
/// order. A name declared twice keeps its first position in the order but
/// the later interval (last write wins).
#[derive(Debug, Clone, Default)]
pub struct ScopeMap {
    entries: Vec<(String, ScopeSpan)>,
    index: HashMap<String, usize>,
}

impl ScopeMap {
    fn record(&mut self, name: &str, span: ScopeSpan) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 = span,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), span));
            }
        }
    }

    /// Interval for a symbol, if it has one.
    pub fn get(&self, name: &str) -> Option<ScopeSpan> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Iterate `(name, span)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ScopeSpan)> {
        self.entries.iter().map(|(name, span)| (name.as_str(), *span))
    }

    /// Symbol names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign a scope interval to every named top-level construct.
///
/// `registry` must already include every class name discovered by the
/// hierarchy pass; it is read-only here. `source_len` closes the final open
/// scope at end of file.
pub fn extract_scopes(
    matches: &[TopLevelMatch],
    registry: &NameRegistry,
    source_len: usize,
) -> ScopeMap {
    let mut scopes = ScopeMap::default();
    // Currently open scope: (name, start). None between an assignment and
    // the next class/def.
    let mut open: Option<(String, usize)> = None;

    for matched in matches {
        match matched {
            TopLevelMatch::Class(decl) => {
                close_open(&mut scopes, &mut open, decl.start);
                open = Some((decl.name.clone(), decl.start));
            }
            TopLevelMatch::Method { name, start } => {
                close_open(&mut scopes, &mut open, *start);
                open = Some((name.clone(), *start));
            }
            TopLevelMatch::Assignment { name, start, end } => {
                close_open(&mut scopes, &mut open, *start);
                if registry.contains(name) {
                    scopes.record(
                        name,
                        ScopeSpan {
                            start: *start,
                            end: *end,
                        },
                    );
                }
            }
            TopLevelMatch::Other { .. } => {}
        }
    }
    close_open(&mut scopes, &mut open, source_len);

    tracing::debug!(scopes = scopes.len(), "extracted top-level scopes");
    scopes
}

fn close_open(scopes: &mut ScopeMap, open: &mut Option<(String, usize)>, end: usize) {
    if let Some((name, start)) = open.take() {
        scopes.record(&name, ScopeSpan { start, end });
    }
}

// ============================================================================
// Tests
// ============================================================================
