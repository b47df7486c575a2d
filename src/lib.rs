//! Pyscope: top-level scope and reference mapping for Python source files.
//!
//! Extracts a lightweight structural model from a single source file: the
//! class inheritance hierarchy, the scopes of top-level classes, functions,
//! and registered module-level assignments, and a directed graph of which
//! known names each scope's body mentions. No syntax tree is built and the
//! analyzed code is never executed; recognition is a column-anchored scan
//! over the raw text with comments and string literals skipped.

// Leaf utilities
pub mod error;
pub mod lexical;
pub mod text;

// Recognition and extraction passes
pub mod hierarchy;
pub mod references;
pub mod registry;
pub mod scan;
pub mod scopes;

// Pipeline and front-door plumbing
pub mod analyzer;
pub mod output;

pub use analyzer::{analyze, analyze_file, Analysis};
pub use error::{OutputErrorCode, PyscopeError, PyscopeResult};
pub use registry::NameRegistry;
