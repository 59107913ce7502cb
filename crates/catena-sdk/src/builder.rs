//! Builder pattern for Catena

use crate::config::{CommandConfig, EngineConfig};
use crate::defaults::ConventionalDefaults;
use crate::engine::Catena;
use crate::error::Result;
use crate::registry::PipelineRegistry;
use catena_compiler::ChainCompiler;
use catena_core::{Stage, StageResolver};
use catena_runtime::{CommandStage, StageTable};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for [`Catena`]
///
/// # Example
///
/// ```rust,ignore
/// use catena_sdk::{Catena, Options};
///
/// let engine = Catena::builder()
///     .map("page", "template>@>html")
///     .build()
///     .await?;
///
/// let html = engine
///     .compile_to_string("page", "<h1>{{ title }}</h1>", &Options::new().with("title", "Docs"))
///     .await?;
/// ```
pub struct CatenaBuilder {
    config: EngineConfig,
    stages: StageTable,
    resolver: Option<Arc<dyn StageResolver>>,
}

impl CatenaBuilder {
    /// Create a new builder with the built-in stages
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            stages: StageTable::with_builtins(),
            resolver: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom resolver instead of the built-in stage table
    pub fn with_resolver(mut self, resolver: Arc<dyn StageResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Register an additional stage in the built-in stage table
    pub fn with_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.stages.insert(stage);
        self
    }

    /// Register an external program stage
    pub fn with_command(mut self, name: impl Into<String>, command: CommandConfig) -> Self {
        self.config.commands.insert(name.into(), command);
        self
    }

    /// Map an extension to a chain ("*" for wildcard documents)
    pub fn map(mut self, ext: impl Into<String>, chain: impl Into<String>) -> Self {
        self.config.mappings.insert(ext.into(), chain.into());
        self
    }

    /// Default chain for an extension that is first used unmapped
    pub fn default_chain(mut self, ext: impl Into<String>, chain: impl Into<String>) -> Self {
        self.config.defaults.insert(ext.into(), chain.into());
        self
    }

    /// Render deferred output handed between pre-segment stages
    pub fn auto_force(mut self, enable: bool) -> Self {
        self.config.auto_force = enable;
        self
    }

    /// Let unknown extensions default to a chain of the same name
    pub fn fallback_to_extension(mut self, enable: bool) -> Self {
        self.config.fallback_to_extension = enable;
        self
    }

    /// Allow on-demand fetching of compilers
    pub fn allow_fetch(mut self, enable: bool) -> Self {
        self.config.allow_fetch = enable;
        self
    }

    /// Compiler installation directory
    pub fn install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.install_dir = dir.into();
        self
    }

    /// Build the engine, compiling every configured mapping
    pub async fn build(self) -> Result<Catena> {
        let CatenaBuilder {
            config,
            mut stages,
            resolver,
        } = self;

        let resolver: Arc<dyn StageResolver> = match resolver {
            Some(resolver) => {
                if !config.commands.is_empty() {
                    warn!(
                        "Ignoring {} configured command stages: a custom resolver is in use",
                        config.commands.len()
                    );
                }
                resolver
            }
            None => {
                for (name, command) in &config.commands {
                    stages.insert_as(
                        name.clone(),
                        Arc::new(CommandStage::new(
                            name.clone(),
                            command.program.clone(),
                            command.args.clone(),
                        )),
                    );
                }
                Arc::new(stages)
            }
        };

        let compiler = ChainCompiler::new(resolver, config.resolver_config());
        let defaults = ConventionalDefaults::new(config.fallback_to_extension)
            .with_overrides(config.defaults.clone());
        let registry = PipelineRegistry::new(compiler, Arc::new(defaults), config.force_mode());

        // Sorted so failures are reported deterministically
        let mut mappings: Vec<(&String, &String)> = config.mappings.iter().collect();
        mappings.sort();
        for (ext, chain) in mappings {
            registry.add(ext, Some(chain.as_str())).await?;
        }

        info!(
            mappings = config.mappings.len(),
            commands = config.commands.len(),
            "Catena engine initialized"
        );
        Ok(Catena::new(registry, config))
    }
}

impl Default for CatenaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
