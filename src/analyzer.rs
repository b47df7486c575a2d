//! Analysis pipeline: scan, hierarchy, scopes, references.
//!
//! The phases run in a fixed order because of a data dependency: the
//! hierarchy pass grows the name registry with discovered class names, and
//! the scope extractor consults registry membership to decide whether an
//! assignment is tracked. The registry is therefore mutable only inside
//! [`analyze`]; by the time scopes are extracted it is effectively frozen.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{PyscopeError, PyscopeResult};
use crate::hierarchy::{build_hierarchy, ClassHierarchy};
use crate::references::{scan_references, ReferenceGraph};
use crate::registry::NameRegistry;
use crate::scan::scan_top_level;
use crate::scopes::{extract_scopes, ScopeMap};

/// Result of analyzing one source file.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Class name -> base classes, plus inheritance edges in file order.
    pub hierarchy: ClassHierarchy,
    /// Symbol name -> scope interval, in discovery order.
    pub scopes: ScopeMap,
    /// Symbol name -> referenced symbols.
    pub references: ReferenceGraph,
}

/// Run the full pipeline over in-memory source text.
///
/// `registry` seeds the known-name universe; class names found in the
/// source are added before scopes are extracted.
pub fn analyze(source: &str, mut registry: NameRegistry) -> PyscopeResult<Analysis> {
    let matches = scan_top_level(source)?;
    debug!(matches = matches.len(), "segmented top-level constructs");

    let hierarchy = build_hierarchy(&matches, &mut registry);
    let scopes = extract_scopes(&matches, &registry, source.len());
    let references = scan_references(source, &scopes);

    Ok(Analysis {
        hierarchy,
        scopes,
        references,
    })
}

/// Read a source file into memory and analyze it.
///
/// The whole file is read up front; the handle is released as soon as the
/// bytes are obtained.
pub fn analyze_file(path: &Path, registry: NameRegistry) -> PyscopeResult<Analysis> {
    let source = fs::read_to_string(path).map_err(|source| PyscopeError::SourceRead {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read source file");
    analyze(&source, registry)
}

// ============================================================================
// Tests
// ============================================================================
