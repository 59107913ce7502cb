//! Stage output values

use crate::error::Result;
use crate::options::Options;
use std::fmt;
use std::sync::Arc;

type RenderFn = dyn Fn(&Options) -> Result<String> + Send + Sync;

/// A deferred renderer
///
/// Produced by stages such as templates that compile to a reusable render
/// function instead of text, and by forced chains, which hand every result
/// back in this shape.
#[derive(Clone)]
pub struct Renderer {
    render: Arc<RenderFn>,
}

impl Renderer {
    /// Wrap a render function
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Options) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            render: Arc::new(render),
        }
    }

    /// A renderer that ignores its options and returns `text`
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// Materialize the text with the given options
    pub fn render(&self, options: &Options) -> Result<String> {
        (self.render)(options)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer(..)")
    }
}

/// Output of a stage or pipeline
#[derive(Debug, Clone)]
pub enum Output {
    /// Plain text
    Text(String),

    /// A renderer still waiting for options
    Deferred(Renderer),
}

impl Output {
    pub fn is_deferred(&self) -> bool {
        matches!(self, Output::Deferred(_))
    }

    /// Borrow the text if this output is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Output::Text(text) => Some(text),
            Output::Deferred(_) => None,
        }
    }

    /// Force the output to text, rendering deferred output with `options`
    pub fn force(self, options: &Options) -> Result<String> {
        match self {
            Output::Text(text) => Ok(text),
            Output::Deferred(renderer) => renderer.render(options),
        }
    }

    /// Turn the output into a renderer; plain text becomes a constant thunk
    pub fn into_renderer(self) -> Renderer {
        match self {
            Output::Text(text) => Renderer::from_text(text),
            Output::Deferred(renderer) => renderer,
        }
    }
}

impl From<String> for Output {
    fn from(text: String) -> Self {
        Output::Text(text)
    }
}

impl From<&str> for Output {
    fn from(text: &str) -> Self {
        Output::Text(text.to_string())
    }
}

impl From<Renderer> for Output {
    fn from(renderer: Renderer) -> Self {
        Output::Deferred(renderer)
    }
}
