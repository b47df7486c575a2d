//! Report rendering and JSON output types.
//!
//! Two report modes, independently toggled and freely combined: the class
//! inheritance hierarchy and the reference graph. Text mode renders the
//! yUML-style directed-edge notation:
//!
//! ```text
//! [Alpha]^-[Beta]          hierarchy: base ^- derived
//! [Beta]                   reference: node declaration
//! [Beta]->[Alpha]          reference: outgoing edge
//! ```
//!
//! JSON mode wraps the same data in a versioned response envelope with
//! `status` first, deterministic field order, and an error envelope that
//! mirrors the success shape.

use std::fmt::Write as _;
use std::io::{self, Write};

use serde::Serialize;

use crate::analyzer::Analysis;
use crate::error::{OutputErrorCode, PyscopeError};
use crate::hierarchy::ClassHierarchy;
use crate::references::ReferenceGraph;

/// Current schema version for all JSON responses.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Report Configuration
// ============================================================================

/// Which reports to produce. Both may be enabled; hierarchy renders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportToggles {
    pub hierarchy: bool,
    pub references: bool,
}

// ============================================================================
// Text Rendering
// ============================================================================

/// Render hierarchy edges, one `[base]^-[derived]` line per edge in file
/// order.
pub fn render_hierarchy(hierarchy: &ClassHierarchy) -> String {
    let mut out = String::new();
    for edge in hierarchy.edges() {
        let _ = writeln!(out, "[{}]^-[{}]", edge.base, edge.derived);
    }
    out
}

/// Render the reference graph: per symbol one `[name]` line, then one
/// `[name]->[ref]` line per outgoing edge.
pub fn render_references(references: &ReferenceGraph) -> String {
    let mut out = String::new();
    for (name, refs) in references.iter() {
        let _ = writeln!(out, "[{}]", name);
        for referenced in refs {
            let _ = writeln!(out, "[{}]->[{}]", name, referenced);
        }
    }
    out
}

/// Render the enabled reports, concatenated to one stream.
pub fn render_report(analysis: &Analysis, toggles: ReportToggles) -> String {
    let mut out = String::new();
    if toggles.hierarchy {
        out.push_str(&render_hierarchy(&analysis.hierarchy));
    }
    if toggles.references {
        out.push_str(&render_references(&analysis.references));
    }
    out
}

// ============================================================================
// JSON Response Types
// ============================================================================

/// One inheritance edge for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct InheritanceEdgeInfo {
    pub base: String,
    pub derived: String,
}

/// One reference-graph node with its outgoing edges, for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceNodeInfo {
    pub name: String,
    pub references: Vec<String>,
}

/// Successful analysis response.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Analyzed file path as given.
    pub file: String,
    /// Inheritance edges in file order; absent when the hierarchy report is
    /// disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Vec<InheritanceEdgeInfo>>,
    /// Reference adjacency in scope-discovery order; absent when the
    /// reference report is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<ReferenceNodeInfo>>,
}

impl AnalyzeResponse {
    /// Build the response for the enabled reports.
    pub fn from_analysis(file: impl Into<String>, analysis: &Analysis, toggles: ReportToggles) -> Self {
        let hierarchy = toggles.hierarchy.then(|| {
            analysis
                .hierarchy
                .edges()
                .iter()
                .map(|edge| InheritanceEdgeInfo {
                    base: edge.base.clone(),
                    derived: edge.derived.clone(),
                })
                .collect()
        });
        let references = toggles.references.then(|| {
            analysis
                .references
                .iter()
                .map(|(name, refs)| ReferenceNodeInfo {
                    name: name.to_string(),
                    references: refs.iter().cloned().collect(),
                })
                .collect()
        });
        AnalyzeResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            file: file.into(),
            hierarchy,
            references,
        }
    }
}

/// Error information for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Numeric error code (matches the CLI exit code).
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Source line where the error occurred, for parse errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Source column where the error occurred, for parse errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
}

impl ErrorInfo {
    /// Create from a PyscopeError.
    pub fn from_error(err: &PyscopeError) -> Self {
        let (line, col) = match err {
            PyscopeError::MalformedDeclaration { line, col, .. } => (Some(*line), Some(*col)),
            _ => (None, None),
        };
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
            line,
            col,
        }
    }
}

/// Error response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a PyscopeError.
    pub fn from_error(err: &PyscopeError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Serialize a response as pretty JSON followed by a newline.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================
