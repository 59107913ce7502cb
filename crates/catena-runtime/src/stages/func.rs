use async_trait::async_trait;
use catena_core::{Options, Output, Result, Stage};
use std::fmt;

/// A stage backed by a synchronous closure
pub struct FnStage<F> {
    name: String,
    func: F,
}

impl<F> FnStage<F>
where
    F: Fn(String, &Options) -> Result<Output> + Send + Sync,
{
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> fmt::Debug for FnStage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStage").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F> Stage for FnStage<F>
where
    F: Fn(String, &Options) -> Result<Output> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, input: String, options: &Options) -> Result<Output> {
        (self.func)(input, options)
    }
}
