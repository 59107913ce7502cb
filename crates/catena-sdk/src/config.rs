//! Configuration types for the catena engine

use catena_core::ResolverConfig;
use catena_runtime::ForceMode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where compiler implementations are installed
    pub install_dir: PathBuf,

    /// Allow the resolver to fetch missing compilers
    pub allow_fetch: bool,

    /// Render deferred output handed between pre-segment stages
    pub auto_force: bool,

    /// Unknown extensions default to a chain named after themselves
    pub fallback_to_extension: bool,

    /// Extension to chain mappings registered at startup ("*" for wildcard)
    pub mappings: HashMap<String, String>,

    /// Default chains consulted when an unmapped extension is first used
    pub defaults: HashMap<String, String>,

    /// External program stages, keyed by stage name
    pub commands: HashMap<String, CommandConfig>,
}

impl EngineConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            install_dir: ResolverConfig::default().install_dir,
            allow_fetch: false,
            auto_force: false,
            fallback_to_extension: true,
            mappings: HashMap::new(),
            defaults: HashMap::new(),
            commands: HashMap::new(),
        }
    }

    /// Map an extension to a chain
    pub fn with_mapping(mut self, ext: impl Into<String>, chain: impl Into<String>) -> Self {
        self.mappings.insert(ext.into(), chain.into());
        self
    }

    /// Register an external program stage
    pub fn with_command(mut self, name: impl Into<String>, command: CommandConfig) -> Self {
        self.commands.insert(name.into(), command);
        self
    }

    /// Set auto-forcing of deferred output between stages
    pub fn auto_force(mut self, enable: bool) -> Self {
        self.auto_force = enable;
        self
    }

    /// Resolver configuration derived from this config
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            install_dir: self.install_dir.clone(),
            allow_fetch: self.allow_fetch,
        }
    }

    pub fn force_mode(&self) -> ForceMode {
        if self.auto_force {
            ForceMode::Auto
        } else {
            ForceMode::Strict
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// External program stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Program to run
    pub program: String,

    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.install_dir, PathBuf::from(".catena"));
        assert!(!config.allow_fetch);
        assert!(config.fallback_to_extension);
        assert_eq!(config.force_mode(), ForceMode::Strict);
        assert!(config.mappings.is_empty());
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::new()
            .with_mapping("md", "markdown>html")
            .with_command(
                "markdown",
                CommandConfig {
                    program: "pandoc".to_string(),
                    args: vec!["-f".to_string(), "markdown".to_string()],
                },
            )
            .auto_force(true);

        assert_eq!(config.mappings.get("md").map(String::as_str), Some("markdown>html"));
        assert_eq!(config.commands["markdown"].program, "pandoc");
        assert_eq!(config.force_mode(), ForceMode::Auto);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig = serde_json::from_str(
            r#"{
                "allow_fetch": true,
                "mappings": { "page": "*" },
                "commands": { "upper": { "program": "tr" } }
            }"#,
        )
        .unwrap();

        assert!(config.allow_fetch);
        assert!(config.fallback_to_extension);
        assert_eq!(config.mappings["page"], "*");
        assert!(config.commands["upper"].args.is_empty());
        assert!(config.resolver_config().allow_fetch);
    }
}
