//! The catena engine facade

use crate::builder::CatenaBuilder;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::registry::PipelineRegistry;
use catena_core::{Options, Output};
use std::path::Path;
use tracing::info;

/// Compiles documents through the chain selected by their extension
pub struct Catena {
    registry: PipelineRegistry,
    config: EngineConfig,
}

impl Catena {
    pub(crate) fn new(registry: PipelineRegistry, config: EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Start building an engine
    pub fn builder() -> CatenaBuilder {
        CatenaBuilder::new()
    }

    /// The extension and pipeline registry
    pub fn registry(&self) -> &PipelineRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compile `text` as a document with extension `ext`
    pub async fn compile(&self, ext: &str, text: &str, options: &Options) -> Result<Output> {
        self.registry.compile(ext, text, options).await
    }

    /// Compile and force the result to text
    pub async fn compile_to_string(
        &self,
        ext: &str,
        text: &str,
        options: &Options,
    ) -> Result<String> {
        let output = self.compile(ext, text, options).await?;
        Ok(output.force(options)?)
    }

    /// Read a file and compile it with the chain for its extension
    pub async fn compile_file(&self, path: impl AsRef<Path>, options: &Options) -> Result<Output> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| SdkError::MissingExtension(path.to_path_buf()))?;

        let contents = tokio::fs::read_to_string(path).await?;
        info!(path = %path.display(), ext, "compiling file");
        self.compile(ext, &contents, options).await
    }
}
