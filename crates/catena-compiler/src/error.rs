//! Compiler error types

use catena_core::CoreError;
use catena_parser::ParseError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// Malformed chain specification
    #[error("Invalid chain: {0}")]
    Parse(#[from] ParseError),

    /// A stage name could not be resolved
    #[error("Cannot resolve stage '{stage}': {source}")]
    Resolution {
        stage: String,
        #[source]
        source: CoreError,
    },
}

impl CompileError {
    /// True for errors detectable without resolving any stage
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, CompileError::Parse(_))
    }
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
