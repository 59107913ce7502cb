//! Pipeline registry
//!
//! Maps extensions to chains and chains to compiled pipelines. Pipelines are
//! cached by chain specification, so every extension mapped to the same
//! chain shares one pipeline instance.
//!
//! All state sits behind one async mutex. Compilation happens while the lock
//! is held, which serializes concurrent `add`/`get` calls for the same chain
//! and guarantees a chain is compiled once. Pipelines themselves run outside
//! the lock.

use crate::defaults::{builtin_default, DefaultChainResolver, BUILTIN_DEFAULTS};
use crate::error::{Result, SdkError};
use crate::wildcard;
use catena_compiler::ChainCompiler;
use catena_core::{Options, Output};
use catena_parser::WILDCARD;
use catena_runtime::{ForceMode, Pipeline};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// What an extension is mapped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingTarget {
    /// A chain specification
    Chain(String),
    /// Per-block dispatch through wildcard markers
    Wildcard,
}

impl MappingTarget {
    /// Interpret a mapping value; the wildcard sentinel selects block dispatch
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value == WILDCARD {
            MappingTarget::Wildcard
        } else {
            MappingTarget::Chain(value.to_string())
        }
    }

    pub fn as_chain(&self) -> Option<&str> {
        match self {
            MappingTarget::Chain(chain) => Some(chain),
            MappingTarget::Wildcard => None,
        }
    }
}

impl fmt::Display for MappingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingTarget::Chain(chain) => f.write_str(chain),
            MappingTarget::Wildcard => f.write_str(WILDCARD),
        }
    }
}

#[derive(Default)]
struct RegistryState {
    /// extension -> chain or wildcard
    mapping: HashMap<String, MappingTarget>,
    /// chain specification -> compiled pipeline
    pipelines: HashMap<String, Arc<Pipeline>>,
}

impl RegistryState {
    fn is_referenced(&self, chain: &str) -> bool {
        self.mapping
            .values()
            .any(|target| target.as_chain() == Some(chain))
    }
}

/// Extension and pipeline registry
///
/// Extensions are trimmed of surrounding whitespace by every operation.
pub struct PipelineRegistry {
    state: Mutex<RegistryState>,
    compiler: ChainCompiler,
    defaults: Arc<dyn DefaultChainResolver>,
    mode: ForceMode,
}

impl PipelineRegistry {
    /// Create a registry seeded with the built-in extensions
    ///
    /// Built-in mappings are recorded immediately; their pipelines are
    /// compiled on first use.
    pub fn new(
        compiler: ChainCompiler,
        defaults: Arc<dyn DefaultChainResolver>,
        mode: ForceMode,
    ) -> Self {
        let mut state = RegistryState::default();
        for (ext, chain) in BUILTIN_DEFAULTS {
            state
                .mapping
                .insert(ext.to_string(), MappingTarget::Chain(chain.to_string()));
        }

        Self {
            state: Mutex::new(state),
            compiler,
            defaults,
            mode,
        }
    }

    /// Map `ext` to `chain`, or to its default chain when `chain` is `None`
    ///
    /// Returns the pipeline for chain mappings and `None` for the wildcard.
    /// The mapping is only changed once the pipeline compiled successfully.
    pub async fn add(&self, ext: &str, chain: Option<&str>) -> Result<Option<Arc<Pipeline>>> {
        let ext = ext.trim();
        if ext.is_empty() {
            return Err(SdkError::Config("extension must not be empty".to_string()));
        }

        let target = match chain {
            Some(chain) => MappingTarget::parse(chain),
            None => self.default_target(ext)?,
        };

        let mut state = self.state.lock().await;
        self.insert_locked(&mut state, ext, target).await
    }

    /// Remove the mapping for `ext`
    ///
    /// The pipeline is dropped once no extension refers to its chain.
    /// Built-in extensions are reset to their built-in chain instead of
    /// being left unmapped. Removing an unmapped extension is a no-op.
    pub async fn remove(&self, ext: &str) {
        let ext = ext.trim();
        let mut state = self.state.lock().await;

        if let Some(MappingTarget::Chain(chain)) = state.mapping.remove(ext) {
            if !state.is_referenced(&chain) && state.pipelines.remove(&chain).is_some() {
                debug!(chain = %chain, "dropped unreferenced pipeline");
            }
        }

        if let Some(chain) = builtin_default(ext) {
            info!(ext, chain, "reset built-in extension");
            state
                .mapping
                .insert(ext.to_string(), MappingTarget::Chain(chain.to_string()));
        } else {
            debug!(ext, "removed extension mapping");
        }
    }

    /// Whether `ext` is mapped, wildcard included
    pub async fn has(&self, ext: &str) -> bool {
        self.state.lock().await.mapping.contains_key(ext.trim())
    }

    /// Current mapping for `ext`
    pub async fn mapping_for(&self, ext: &str) -> Option<MappingTarget> {
        self.state.lock().await.mapping.get(ext.trim()).cloned()
    }

    /// All mapped extensions, sorted
    pub async fn extensions(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut extensions: Vec<String> = state.mapping.keys().cloned().collect();
        extensions.sort();
        extensions
    }

    /// Chains with a compiled pipeline, sorted
    pub async fn cached_chains(&self) -> Vec<String> {
        let state = self.state.lock().await;
        let mut chains: Vec<String> = state.pipelines.keys().cloned().collect();
        chains.sort();
        chains
    }

    /// Pipeline for `chain`, compiled and cached on first access
    pub async fn get(&self, chain: &str) -> Result<Arc<Pipeline>> {
        let mut state = self.state.lock().await;
        self.pipeline_locked(&mut state, chain.trim()).await
    }

    /// Compile `text` with the chain mapped to `ext`
    ///
    /// Unmapped extensions are registered through their default chain
    /// first. Wildcard-mapped extensions are compiled block by block.
    pub fn compile<'a>(
        &'a self,
        ext: &'a str,
        text: &'a str,
        options: &'a Options,
    ) -> BoxFuture<'a, Result<Output>> {
        Box::pin(async move {
            let ext = ext.trim();
            match self.ensure(ext).await? {
                MappingTarget::Wildcard => {
                    debug!(ext, "compiling wildcard document");
                    let text = wildcard::compile_document(self, text, options).await?;
                    Ok(Output::Text(text))
                }
                MappingTarget::Chain(chain) => {
                    let pipeline = self.get(&chain).await?;
                    debug!(ext, chain = %chain, "compiling with pipeline");
                    Ok(pipeline.execute(text, options).await?)
                }
            }
        })
    }

    /// Mapping for `ext`, registering its default chain if it has none
    async fn ensure(&self, ext: &str) -> Result<MappingTarget> {
        let mut state = self.state.lock().await;
        if let Some(target) = state.mapping.get(ext) {
            return Ok(target.clone());
        }

        let target = self.default_target(ext)?;
        debug!(ext, target = %target, "lazily registering default chain");
        self.insert_locked(&mut state, ext, target.clone()).await?;
        Ok(target)
    }

    fn default_target(&self, ext: &str) -> Result<MappingTarget> {
        self.defaults
            .default_chain(ext)
            .map(|chain| MappingTarget::parse(&chain))
            .ok_or_else(|| SdkError::UnknownExtension(ext.to_string()))
    }

    async fn insert_locked(
        &self,
        state: &mut RegistryState,
        ext: &str,
        target: MappingTarget,
    ) -> Result<Option<Arc<Pipeline>>> {
        let pipeline = match &target {
            MappingTarget::Wildcard => None,
            MappingTarget::Chain(chain) => Some(self.pipeline_locked(state, chain).await?),
        };

        info!(ext, target = %target, "registered extension");
        state.mapping.insert(ext.to_string(), target);
        Ok(pipeline)
    }

    async fn pipeline_locked(
        &self,
        state: &mut RegistryState,
        chain: &str,
    ) -> Result<Arc<Pipeline>> {
        if let Some(pipeline) = state.pipelines.get(chain) {
            return Ok(pipeline.clone());
        }

        let compiled = self.compiler.compile(chain).await?;
        let pipeline = Arc::new(Pipeline::new(compiled, self.mode));
        state.pipelines.insert(chain.to_string(), pipeline.clone());
        debug!(chain, "compiled and cached pipeline");
        Ok(pipeline)
    }
}
