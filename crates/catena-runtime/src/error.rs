//! Runtime error types

use catena_core::CoreError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A stage failed; the remaining stages were not run
    #[error("Stage '{stage}' failed: {source}")]
    Stage {
        stage: String,
        #[source]
        source: CoreError,
    },

    /// A stage handed a deferred renderer to the next stage in strict mode
    #[error("Stage '{stage}' returned a deferred renderer but is followed by another stage")]
    DeferredBetweenStages { stage: String },

    /// Forcing deferred output to text failed
    #[error("Render error: {0}")]
    Render(#[source] CoreError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
