//! Stage runner
//!
//! Invokes stages strictly one after another, feeding each stage's output to
//! the next. The first failure stops the run; nothing produced before it is
//! returned.

use crate::error::{Result, RuntimeError};
use catena_core::{Options, Output, Stage};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// What to do with a deferred renderer handed from one stage to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceMode {
    /// Reject it
    #[default]
    Strict,
    /// Render it with the current options and pass the text on
    Auto,
}

/// Sequential stage executor
#[derive(Debug, Clone, Copy, Default)]
pub struct StageRunner {
    mode: ForceMode,
}

impl StageRunner {
    pub fn new(mode: ForceMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ForceMode {
        self.mode
    }

    /// Run `stages` over `input`
    ///
    /// An empty stage list returns the input unchanged. The last stage's
    /// output is returned as produced, deferred or not.
    pub async fn run(
        &self,
        stages: &[Arc<dyn Stage>],
        input: String,
        options: &Options,
    ) -> Result<Output> {
        let mut current = Output::Text(input);
        let mut previous: Option<&str> = None;

        for stage in stages {
            let text = match current {
                Output::Text(text) => text,
                Output::Deferred(renderer) => match self.mode {
                    ForceMode::Auto => renderer.render(options).map_err(RuntimeError::Render)?,
                    ForceMode::Strict => {
                        return Err(RuntimeError::DeferredBetweenStages {
                            stage: previous.unwrap_or_default().to_string(),
                        });
                    }
                },
            };

            let started = Instant::now();
            current = stage
                .run(text, options)
                .await
                .map_err(|source| RuntimeError::Stage {
                    stage: stage.name().to_string(),
                    source,
                })?;
            debug!(
                stage = stage.name(),
                deferred = current.is_deferred(),
                elapsed_us = saturating_micros(started.elapsed()),
                "stage completed"
            );

            previous = Some(stage.name());
        }

        Ok(current)
    }
}

fn saturating_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}
