//! Default chain resolution
//!
//! Built-in extensions always have a chain: removing one from the registry
//! resets it to the entry in [`BUILTIN_DEFAULTS`].

use std::collections::HashMap;

/// Built-in extension to chain table
pub const BUILTIN_DEFAULTS: &[(&str, &str)] = &[
    ("txt", "text"),
    ("html", "html"),
    ("css", "css"),
    ("js", "js"),
];

/// Built-in default chain for `ext`, if it is a built-in extension
pub fn builtin_default(ext: &str) -> Option<&'static str> {
    BUILTIN_DEFAULTS
        .iter()
        .find(|(builtin, _)| *builtin == ext)
        .map(|(_, chain)| *chain)
}

/// Looks up the conventional chain for an extension
pub trait DefaultChainResolver: Send + Sync {
    fn default_chain(&self, ext: &str) -> Option<String>;
}

/// Configured overrides, then built-ins, then optionally the extension itself
#[derive(Debug, Clone, Default)]
pub struct ConventionalDefaults {
    overrides: HashMap<String, String>,
    fallback_to_extension: bool,
}

impl ConventionalDefaults {
    pub fn new(fallback_to_extension: bool) -> Self {
        Self {
            overrides: HashMap::new(),
            fallback_to_extension,
        }
    }

    /// Add per-extension overrides
    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.overrides.extend(overrides);
        self
    }
}

impl DefaultChainResolver for ConventionalDefaults {
    fn default_chain(&self, ext: &str) -> Option<String> {
        if let Some(chain) = self.overrides.get(ext) {
            return Some(chain.clone());
        }
        if let Some(chain) = builtin_default(ext) {
            return Some(chain.to_string());
        }
        self.fallback_to_extension.then(|| ext.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_default() {
        assert_eq!(builtin_default("txt"), Some("text"));
        assert_eq!(builtin_default("js"), Some("js"));
        assert_eq!(builtin_default("JS"), None);
        assert_eq!(builtin_default("md"), None);
    }

    #[test]
    fn test_lookup_order() {
        let mut overrides = HashMap::new();
        overrides.insert("md".to_string(), "markdown>html".to_string());
        overrides.insert("css".to_string(), "css>minify".to_string());
        let defaults = ConventionalDefaults::new(false).with_overrides(overrides);

        assert_eq!(defaults.default_chain("md").as_deref(), Some("markdown>html"));
        assert_eq!(defaults.default_chain("css").as_deref(), Some("css>minify"));
        assert_eq!(defaults.default_chain("html").as_deref(), Some("html"));
        assert_eq!(defaults.default_chain("xyz"), None);
    }

    #[test]
    fn test_fallback_to_extension() {
        let defaults = ConventionalDefaults::new(true);
        assert_eq!(defaults.default_chain("coffee").as_deref(), Some("coffee"));
    }
}
