//! Executable pipelines
//!
//! A pipeline runs the chain's pre-segment through the [`StageRunner`].
//! Chains without a force-to-text boundary return that output as is. Forced
//! chains render it to text, hand the text to the single post stage (if
//! any), and always return a renderer so callers never branch on shape.

use crate::error::{Result, RuntimeError};
use crate::runner::{ForceMode, StageRunner};
use catena_compiler::CompiledChain;
use catena_core::{Options, Output};
use tracing::debug;

/// The executable form of a chain
#[derive(Debug)]
pub struct Pipeline {
    chain: CompiledChain,
    runner: StageRunner,
}

impl Pipeline {
    pub fn new(chain: CompiledChain, mode: ForceMode) -> Self {
        Self {
            chain,
            runner: StageRunner::new(mode),
        }
    }

    /// Canonical chain specification
    pub fn spec(&self) -> String {
        self.chain.spec.to_string()
    }

    pub fn chain(&self) -> &CompiledChain {
        &self.chain
    }

    /// Run the pipeline over `input`
    pub async fn execute(&self, input: impl Into<String>, options: &Options) -> Result<Output> {
        let intermediate = self
            .runner
            .run(&self.chain.pre, input.into(), options)
            .await?;

        if !self.chain.is_forced() {
            return Ok(intermediate);
        }

        let text = intermediate.force(options).map_err(RuntimeError::Render)?;

        let output = match &self.chain.post {
            Some(stage) => {
                debug!(stage = stage.name(), "running post stage on forced text");
                stage
                    .run(text, options)
                    .await
                    .map_err(|source| RuntimeError::Stage {
                        stage: stage.name().to_string(),
                        source,
                    })?
            }
            None => Output::Text(text),
        };

        Ok(Output::Deferred(output.into_renderer()))
    }
}
