//! Chain compiler
//!
//! Parses a chain specification and resolves each stage name through the
//! configured [`StageResolver`]. Parsing always completes before the first
//! resolver call, so a malformed chain never triggers any acquisition work.

use crate::error::{CompileError, Result};
use catena_core::{ResolverConfig, Stage, StageResolver};
use catena_parser::{ChainParser, ChainSpec};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A chain whose stage names have been resolved
#[derive(Clone)]
pub struct CompiledChain {
    /// The parsed specification
    pub spec: ChainSpec,
    /// Stages executed unconditionally, in order
    pub pre: Vec<Arc<dyn Stage>>,
    /// Single stage after the force-to-text boundary
    pub post: Option<Arc<dyn Stage>>,
}

impl CompiledChain {
    /// Whether the chain forces its result to text and returns a renderer
    pub fn is_forced(&self) -> bool {
        self.spec.forced
    }
}

impl fmt::Debug for CompiledChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledChain")
            .field("spec", &self.spec.to_string())
            .field("pre", &self.pre.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("post", &self.post.as_ref().map(|s| s.name()))
            .finish()
    }
}

/// Compiles chain specifications into resolved stage lists
#[derive(Clone)]
pub struct ChainCompiler {
    resolver: Arc<dyn StageResolver>,
    config: ResolverConfig,
}

impl ChainCompiler {
    /// Create a compiler backed by `resolver`
    pub fn new(resolver: Arc<dyn StageResolver>, config: ResolverConfig) -> Self {
        Self { resolver, config }
    }

    /// Resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Check a chain specification without resolving anything
    pub fn validate(spec: &str) -> Result<ChainSpec> {
        Ok(ChainParser::parse(spec)?)
    }

    /// Compile a chain specification
    pub async fn compile(&self, spec: &str) -> Result<CompiledChain> {
        let parsed = Self::validate(spec)?;
        debug!("Compiling chain '{}' ({} stages)", parsed, parsed.stage_count());

        let mut pre = Vec::with_capacity(parsed.pre.len());
        for name in &parsed.pre {
            pre.push(self.resolve(name).await?);
        }

        let post = match &parsed.post {
            Some(name) => Some(self.resolve(name).await?),
            None => None,
        };

        Ok(CompiledChain {
            spec: parsed,
            pre,
            post,
        })
    }

    async fn resolve(&self, name: &str) -> Result<Arc<dyn Stage>> {
        self.resolver
            .resolve(name, &self.config)
            .await
            .map_err(|source| CompileError::Resolution {
                stage: name.to_string(),
                source,
            })
    }
}
