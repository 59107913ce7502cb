use async_trait::async_trait;
use catena_core::{Options, Output, Result, Stage};

/// Identity stage
#[derive(Debug, Clone)]
pub struct PassthroughStage {
    name: String,
}

impl PassthroughStage {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Stage for PassthroughStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: String, _options: &Options) -> Result<Output> {
        Ok(Output::Text(input))
    }
}
