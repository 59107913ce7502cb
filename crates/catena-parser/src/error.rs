//! Parser error types

use thiserror::Error;

/// Parser error
///
/// Every variant is a configuration error: it describes a malformed chain
/// that can be rejected before any stage is resolved or run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to parse
    #[error("Empty chain specification")]
    EmptyChain,

    /// Two delimiters with nothing between them, or a dangling delimiter
    #[error("Empty stage name at position {position} in chain '{spec}'")]
    EmptyStage { spec: String, position: usize },

    /// More than one stage after the force-to-text boundary
    #[error("Only one stage may follow the force-to-text boundary in chain '{spec}' (found {count})")]
    MultiplePostStages { spec: String, count: usize },

    /// The boundary token appears twice
    #[error("Force-to-text boundary repeated in chain '{spec}'")]
    RepeatedBoundary { spec: String },

    /// The wildcard sentinel is a whole mapping, never a stage
    #[error("Wildcard cannot appear inside chain '{spec}'")]
    WildcardInChain { spec: String },
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
