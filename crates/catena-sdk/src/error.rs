//! SDK error types

use catena_compiler::CompileError;
use catena_core::CoreError;
use catena_parser::ParseError;
use catena_runtime::RuntimeError;
use std::path::PathBuf;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed chain specification
    #[error("Invalid chain: {0}")]
    Parse(#[from] ParseError),

    /// Chain could not be built
    #[error("Compiler error: {0}")]
    Compile(#[source] CompileError),

    /// A pipeline failed while running
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// Core error, e.g. while rendering deferred output
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No mapping and no default chain for the extension
    #[error("No chain registered or known for extension '{0}'")]
    UnknownExtension(String),

    /// The path has no extension to select a chain with
    #[error("Cannot derive an extension from path: {}", .0.display())]
    MissingExtension(PathBuf),

    /// A wildcard block does not start with a marker line
    #[error("Malformed wildcard marker on line {line}: '{content}'")]
    MalformedMarker { line: usize, content: String },
}

impl SdkError {
    /// True for malformed chains, which are rejected before any stage runs
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, SdkError::Parse(_) | SdkError::Config(_))
    }
}

impl From<CompileError> for SdkError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Parse(parse) => SdkError::Parse(parse),
            other => SdkError::Compile(other),
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("bad mapping".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_compile_parse_error_is_flattened() {
        let error: SdkError = CompileError::Parse(ParseError::EmptyChain).into();
        assert!(matches!(error, SdkError::Parse(ParseError::EmptyChain)));
        assert!(error.is_configuration_error());
    }

    #[test]
    fn test_resolution_error_stays_compile_error() {
        let error: SdkError = CompileError::Resolution {
            stage: "sass".to_string(),
            source: CoreError::UnknownStage("sass".to_string()),
        }
        .into();
        assert!(matches!(error, SdkError::Compile(_)));
        assert!(!error.is_configuration_error());
        assert!(error.to_string().contains("sass"));
    }

    #[test]
    fn test_malformed_marker_message() {
        let error = SdkError::MalformedMarker {
            line: 3,
            content: "stray".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Malformed wildcard marker on line 3: 'stray'"
        );
    }

    #[test]
    fn test_missing_extension_message() {
        let error = SdkError::MissingExtension(PathBuf::from("Makefile"));
        assert!(error.to_string().contains("Makefile"));
    }
}
