//! Class inheritance hierarchy built from the class-declaration matches.
//!
//! Consumes only the class declarations out of the top-level match stream.
//! Besides recording `class -> base classes`, this pass grows the name
//! registry with every class name not already known, which is what later
//! lets assignments to those names be tracked as scopes.

use std::collections::HashMap;

use crate::registry::NameRegistry;
use crate::scan::TopLevelMatch;

/// One inheritance edge, `base -> derived`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritanceEdge {
    pub base: String,
    pub derived: String,
}

/// Mapping from class name to declared base classes, plus the flat edge
/// list in file order. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    bases: HashMap<String, Vec<String>>,
    edges: Vec<InheritanceEdge>,
}

impl ClassHierarchy {
    /// Declared base classes for a class, if it was seen.
    pub fn bases_of(&self, class_name: &str) -> Option<&[String]> {
        self.bases.get(class_name).map(Vec::as_slice)
    }

    /// All inheritance edges, one per (base, derived) pair, in file order.
    /// A class with no bases contributes no edges.
    pub fn edges(&self) -> &[InheritanceEdge] {
        &self.edges
    }

    /// Number of distinct classes seen.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Whether any class was seen.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Build the hierarchy from the match stream, growing `registry` with newly
/// discovered class names.
///
/// A class name declared twice keeps the later base list (last write wins);
/// its edges from both declarations remain in the edge list, matching the
/// file-order emission contract.
pub fn build_hierarchy(matches: &[TopLevelMatch], registry: &mut NameRegistry) -> ClassHierarchy {
    let mut hierarchy = ClassHierarchy::default();

    for matched in matches {
        let decl = match matched {
            TopLevelMatch::Class(decl) => decl,
            _ => continue,
        };
        if !registry.contains(&decl.name) {
            registry.insert(decl.name.clone());
        }
        hierarchy
            .bases
            .insert(decl.name.clone(), decl.bases.clone());
        for base in &decl.bases {
            hierarchy.edges.push(InheritanceEdge {
                base: base.clone(),
                derived: decl.name.clone(),
            });
        }
    }

    tracing::debug!(
        classes = hierarchy.len(),
        edges = hierarchy.edges.len(),
        "built class hierarchy"
    );
    hierarchy
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan_top_level;

    fn hierarchy_of(text: &str) -> (ClassHierarchy, NameRegistry) {
        let matches = scan_top_level(text).unwrap();
        let mut registry = NameRegistry::new();
        let hierarchy = build_hierarchy(&matches, &mut registry);
        (hierarchy, registry)
    }

    #[test]
    fn records_bases_per_class() {
        let (hierarchy, _) = hierarchy_of("class Alpha:\n    pass\nclass Beta(Alpha):\n    pass\n");
        assert_eq!(hierarchy.bases_of("Alpha").unwrap(), &[] as &[String]);
        assert_eq!(hierarchy.bases_of("Beta").unwrap(), ["Alpha"]);
        assert!(hierarchy.bases_of("Gamma").is_none());
    }

    #[test]
    fn edges_in_file_order() {
        let (hierarchy, _) = hierarchy_of(
            "class Base:\n    pass\nclass Mid(Base):\n    pass\nclass Leaf(Mid, Base):\n    pass\n",
        );
        let edges: Vec<(&str, &str)> = hierarchy
            .edges()
            .iter()
            .map(|e| (e.base.as_str(), e.derived.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![("Base", "Mid"), ("Mid", "Leaf"), ("Base", "Leaf")]
        );
    }

    #[test]
    fn grows_registry_with_class_names() {
        let (_, registry) = hierarchy_of("class Alpha:\n    pass\n");
        assert!(registry.contains("Alpha"));
    }

    #[test]
    fn preseeded_names_are_not_duplicated() {
        let matches = scan_top_level("class Alpha:\n    pass\n").unwrap();
        let mut registry = NameRegistry::from_names(["Alpha"]);
        build_hierarchy(&matches, &mut registry);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_class_keeps_last_bases() {
        let (hierarchy, _) =
            hierarchy_of("class Dup(Alpha):\n    pass\nclass Dup(Beta):\n    pass\n");
        assert_eq!(hierarchy.bases_of("Dup").unwrap(), ["Beta"]);
        assert_eq!(hierarchy.len(), 1);
        assert_eq!(hierarchy.edges().len(), 2);
    }

    #[test]
    fn classless_source_yields_empty_hierarchy() {
        let (hierarchy, registry) = hierarchy_of("x = 1\ndef f():\n    pass\n");
        assert!(hierarchy.is_empty());
        assert!(registry.is_empty());
    }
}
