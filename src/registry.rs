//! KnownNames registry: the universe of symbols eligible to become scopes
//! and reference targets.
//!
//! The registry is an explicit input to the analyzer (a set of names from a
//! file and/or the command line), never derived by importing or executing
//! the analyzed module. It is grown with newly discovered class names during
//! the hierarchy pass, then treated as read-only by the scope extractor and
//! reference scanner; [`crate::analyzer`] owns that ordering.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PyscopeError, PyscopeResult};

/// Set of known public names.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    names: HashSet<String>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        NameRegistry::default()
    }

    /// Create a registry from an iterator of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameRegistry {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a registry from a names file: one name per line, with blank
    /// lines and `#` comment lines skipped.
    pub fn load(path: &Path) -> PyscopeResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| PyscopeError::RegistryRead {
            path: path.display().to_string(),
            source,
        })?;
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Ok(NameRegistry { names })
    }

    /// Add a name. Returns `true` if the name was not already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn from_names_and_contains() {
        let registry = NameRegistry::from_names(["Alpha", "Beta"]);
        assert!(registry.contains("Alpha"));
        assert!(registry.contains("Beta"));
        assert!(!registry.contains("Gamma"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut registry = NameRegistry::new();
        assert!(registry.insert("Alpha"));
        assert!(!registry.insert("Alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn load_skips_blanks_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# public surface").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "Alpha").unwrap();
        writeln!(file, "  Beta  ").unwrap();
        let registry = NameRegistry::load(file.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Alpha"));
        assert!(registry.contains("Beta"));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = NameRegistry::load(Path::new("/nonexistent/names.txt")).unwrap_err();
        assert!(matches!(err, PyscopeError::RegistryRead { .. }));
    }
}
