//! Stage capability traits
//!
//! A stage is one named transformation step. Concrete stage kinds live in
//! `catena-runtime`; acquiring them by name is the job of a
//! [`StageResolver`].

use crate::error::Result;
use crate::options::Options;
use crate::output::Output;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// A single transformation step
#[async_trait]
pub trait Stage: Send + Sync {
    /// Name the stage was resolved under
    fn name(&self) -> &str;

    /// Transform `input`
    ///
    /// May return text directly or a deferred renderer.
    async fn run(&self, input: String, options: &Options) -> Result<Output>;
}

/// Configuration handed to a resolver on every lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Where compiler implementations are installed
    pub install_dir: PathBuf,

    /// Whether missing implementations may be fetched on demand
    pub allow_fetch: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            install_dir: PathBuf::from(".catena"),
            allow_fetch: false,
        }
    }
}

/// Turns a stage name into an executable stage
#[async_trait]
pub trait StageResolver: Send + Sync {
    async fn resolve(&self, name: &str, config: &ResolverConfig) -> Result<Arc<dyn Stage>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Suffix;

    #[async_trait]
    impl Stage for Suffix {
        fn name(&self) -> &str {
            "suffix"
        }

        async fn run(&self, input: String, options: &Options) -> Result<Output> {
            let suffix = options.get_str("suffix").unwrap_or("!");
            Ok(Output::Text(format!("{}{}", input, suffix)))
        }
    }

    #[tokio::test]
    async fn test_stage_runs_through_trait_object() {
        let stage: Arc<dyn Stage> = Arc::new(Suffix);
        let options = Options::new().with("suffix", "?");

        let output = stage.run("why".to_string(), &options).await.unwrap();

        assert_eq!(stage.name(), "suffix");
        assert_eq!(output.as_text(), Some("why?"));
    }

    #[test]
    fn test_resolver_config_default() {
        let config = ResolverConfig::default();

        assert_eq!(config.install_dir, PathBuf::from(".catena"));
        assert!(!config.allow_fetch);
    }
}
