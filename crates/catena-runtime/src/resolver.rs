//! In-memory stage resolver
//!
//! Maps stage names to ready-made stages. Installing or fetching compiler
//! implementations is not done here; names that are not registered fail to
//! resolve.

use crate::stages::{PassthroughStage, TemplateStage};
use async_trait::async_trait;
use catena_core::{CoreError, ResolverConfig, Result, Stage, StageResolver};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Names of the built-in passthrough stages
pub const PASSTHROUGH_STAGES: &[&str] = &["text", "html", "css", "js"];

/// Stage lookup table
#[derive(Clone, Default)]
pub struct StageTable {
    stages: HashMap<String, Arc<dyn Stage>>,
}

impl StageTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding the built-in stages
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for name in PASSTHROUGH_STAGES {
            table.insert(Arc::new(PassthroughStage::new(*name)));
        }
        table.insert(Arc::new(TemplateStage::default()));
        table
    }

    /// Register a stage under its own name, replacing any previous entry
    pub fn insert(&mut self, stage: Arc<dyn Stage>) -> Option<Arc<dyn Stage>> {
        self.stages.insert(stage.name().to_string(), stage)
    }

    /// Register a stage under an explicit name
    pub fn insert_as(&mut self, name: impl Into<String>, stage: Arc<dyn Stage>) {
        self.stages.insert(name.into(), stage);
    }

    /// Builder-style insert
    pub fn with_stage(mut self, stage: Arc<dyn Stage>) -> Self {
        self.insert(stage);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stages.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl StageResolver for StageTable {
    async fn resolve(&self, name: &str, config: &ResolverConfig) -> Result<Arc<dyn Stage>> {
        if let Some(stage) = self.stages.get(name) {
            debug!(stage = name, "resolved stage from table");
            return Ok(stage.clone());
        }

        if config.allow_fetch {
            warn!(
                stage = name,
                install_dir = %config.install_dir.display(),
                "stage not registered and on-demand fetching is not available"
            );
            return Err(CoreError::Resolution {
                stage: name.to_string(),
                reason: format!(
                    "not registered and cannot be fetched into {}",
                    config.install_dir.display()
                ),
            });
        }

        Err(CoreError::UnknownStage(name.to_string()))
    }
}
