//! CLI settings
//!
//! Engine settings come from an optional configuration file and `CATENA_*`
//! environment variables; command line flags are applied on top.

use anyhow::{anyhow, Context, Result};
use catena_core::Options;
use catena_sdk::EngineConfig;
use serde_json::Value;
use std::path::Path;

const DEFAULT_CONFIG_FILES: &[&str] = &["catena", "config/catena"];

/// Load the engine configuration
///
/// An explicit `path` must exist. Without one, `catena.*` and
/// `config/catena.*` are read when present.
pub fn load(path: Option<&Path>) -> Result<EngineConfig> {
    // Load .env file if exists
    dotenvy::dotenv().ok();

    let mut builder = config::Config::builder();
    match path {
        Some(path) => {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        None => {
            for name in DEFAULT_CONFIG_FILES {
                builder = builder.add_source(config::File::with_name(name).required(false));
            }
        }
    }

    builder
        .add_source(config::Environment::with_prefix("CATENA"))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .map_err(|e| anyhow!("Failed to deserialize config: {}", e))
}

/// Parse a `KEY=VALUE` argument
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Build compile options from `KEY=VALUE` pairs
///
/// Values that parse as JSON keep their type; anything else is a string.
pub fn build_options(pairs: &[(String, String)]) -> Options {
    let mut options = Options::new();
    for (key, raw) in pairs {
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        options.insert(key.clone(), value);
    }
    options
}
