//! Error types and exit code constants for pyscope.
//!
//! This module provides the unified error type (`PyscopeError`) shared by the
//! analysis pipeline and the CLI, plus `OutputErrorCode`, the stable mapping
//! from errors to process exit codes and JSON error codes.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad flags, unreadable input files)
//! - `3`: Parse errors (malformed top-level declaration in the analyzed source)
//! - `10`: Internal errors (bugs, unexpected state)

use std::fmt;
use std::io;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and CLI exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, unreadable files).
    InvalidArguments = 2,
    /// Structural parse failure in the analyzed source.
    ParseError = 3,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for analysis and CLI output.
///
/// Parser-level structural failures are fatal and terminate the run; all
/// other anomalies in the analyzed source (duplicate names, unterminated
/// strings, assignments to unregistered names) degrade gracefully and never
/// surface here.
#[derive(Debug, Error)]
pub enum PyscopeError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Source file could not be read.
    #[error("cannot read source file {path}: {source}")]
    SourceRead { path: String, source: io::Error },

    /// Names registry file could not be read.
    #[error("cannot read names file {path}: {source}")]
    RegistryRead { path: String, source: io::Error },

    /// A top-level declaration keyword matched but the declaration is
    /// malformed (missing name, unterminated parameter list, missing colon).
    #[error("malformed {construct} declaration at {line}:{col}: {message}")]
    MalformedDeclaration {
        construct: &'static str,
        line: u32,
        col: u32,
        message: String,
    },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl From<&PyscopeError> for OutputErrorCode {
    fn from(err: &PyscopeError) -> Self {
        match err {
            PyscopeError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            PyscopeError::SourceRead { .. } => OutputErrorCode::InvalidArguments,
            PyscopeError::RegistryRead { .. } => OutputErrorCode::InvalidArguments,
            PyscopeError::MalformedDeclaration { .. } => OutputErrorCode::ParseError,
            PyscopeError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<PyscopeError> for OutputErrorCode {
    fn from(err: PyscopeError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl PyscopeError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        PyscopeError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        PyscopeError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

/// Result type for pyscope operations.
pub type PyscopeResult<T> = Result<T, PyscopeError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn invalid_arguments_maps_to_invalid_arguments() {
            let err = PyscopeError::invalid_args("missing required flag");
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
            assert_eq!(err.error_code().code(), 2);
        }

        #[test]
        fn malformed_declaration_maps_to_parse_error() {
            let err = PyscopeError::MalformedDeclaration {
                construct: "class",
                line: 12,
                col: 1,
                message: "expected class name after 'class'".to_string(),
            };
            assert_eq!(err.error_code(), OutputErrorCode::ParseError);
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn source_read_maps_to_invalid_arguments() {
            let err = PyscopeError::SourceRead {
                path: "missing.py".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            };
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
        }

        #[test]
        fn internal_error_maps_to_internal_error() {
            let err = PyscopeError::internal("unexpected state");
            assert_eq!(err.error_code().code(), 10);
        }
    }

    mod error_display {
        use super::*;

        #[test]
        fn malformed_declaration_display() {
            let err = PyscopeError::MalformedDeclaration {
                construct: "def",
                line: 3,
                col: 5,
                message: "expected ':' after parameter list".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "malformed def declaration at 3:5: expected ':' after parameter list"
            );
        }

        #[test]
        fn invalid_arguments_display() {
            let err = PyscopeError::invalid_args("no report selected");
            assert_eq!(err.to_string(), "invalid arguments: no report selected");
        }

        #[test]
        fn display_shows_code() {
            assert_eq!(format!("{}", OutputErrorCode::InvalidArguments), "2");
            assert_eq!(format!("{}", OutputErrorCode::ParseError), "3");
            assert_eq!(format!("{}", OutputErrorCode::InternalError), "10");
        }
    }
}
