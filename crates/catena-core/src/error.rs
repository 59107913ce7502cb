//! Error types for catena core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// A stage reported a failure while transforming its input
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },

    /// A deferred renderer could not produce text
    #[error("Render failed: {0}")]
    RenderFailed(String),

    /// No stage is known under this name
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// The stage exists but could not be made executable
    #[error("Failed to resolve stage '{stage}': {reason}")]
    Resolution { stage: String, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Shorthand for a stage failure
    pub fn stage_failed(stage: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::StageFailed {
            stage: stage.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_message() {
        let error = CoreError::stage_failed("minify", "unexpected token");
        assert_eq!(error.to_string(), "Stage 'minify' failed: unexpected token");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: CoreError = io_error.into();
        assert!(error.to_string().contains("I/O error"));
    }
}
