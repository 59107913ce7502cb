use async_trait::async_trait;
use catena_core::{Options, Output, Renderer, Result, Stage};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use tracing::debug;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\s*\}\}")
        .expect("placeholder pattern is valid")
});

/// Minimal template stage
///
/// Compiles its input into a deferred renderer. Rendering replaces each
/// `{{ key }}` (or dotted `{{ page.title }}`) with the matching option;
/// missing keys render as the empty string.
#[derive(Debug, Clone)]
pub struct TemplateStage {
    name: String,
}

impl TemplateStage {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Render `source` against `options`
    pub fn render(source: &str, options: &Options) -> String {
        PLACEHOLDER
            .replace_all(source, |caps: &Captures<'_>| {
                let key = &caps[1];
                match lookup(options, key) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => {
                        debug!(key, "template key not found");
                        String::new()
                    }
                    Some(other) => other.to_string(),
                }
            })
            .into_owned()
    }
}

impl Default for TemplateStage {
    fn default() -> Self {
        Self::new("template")
    }
}

fn lookup<'a>(options: &'a Options, key: &str) -> Option<&'a Value> {
    let mut parts = key.split('.');
    let mut value = options.get(parts.next()?)?;
    for part in parts {
        value = value.get(part)?;
    }
    Some(value)
}

#[async_trait]
impl Stage for TemplateStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: String, _options: &Options) -> Result<Output> {
        Ok(Output::Deferred(Renderer::new(move |options| {
            Ok(TemplateStage::render(&input, options))
        })))
    }
}
