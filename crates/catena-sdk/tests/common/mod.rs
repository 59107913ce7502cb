//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use catena_core::{CoreError, Options, Output, ResolverConfig, Stage, StageResolver};
use catena_runtime::{FnStage, StageTable};
use catena_sdk::{Catena, CatenaBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared log of (stage, input) pairs in invocation order
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<(String, String)>>>);

impl CallLog {
    pub fn record(&self, stage: &str, input: &str) {
        self.0
            .lock()
            .unwrap()
            .push((stage.to_string(), input.to_string()));
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().clone()
    }

    pub fn stages(&self) -> Vec<String> {
        self.calls().into_iter().map(|(stage, _)| stage).collect()
    }
}

/// Stage that logs its input and applies `transform`
pub fn logged(name: &str, log: &CallLog, transform: fn(&str) -> String) -> Arc<dyn Stage> {
    let log = log.clone();
    let stage_name = name.to_string();
    Arc::new(FnStage::new(name, move |input: String, _: &Options| {
        log.record(&stage_name, &input);
        Ok(Output::Text(transform(&input)))
    }))
}

/// Stage that logs its input and fails
pub fn failing(name: &str, log: &CallLog) -> Arc<dyn Stage> {
    let log = log.clone();
    let stage_name = name.to_string();
    Arc::new(FnStage::new(name, move |input: String, _: &Options| {
        log.record(&stage_name, &input);
        Err(CoreError::stage_failed(&stage_name, "rejected input"))
    }))
}

/// Built-in stages plus `upper`, `same`, `bar`, `foo` and the failing `boom`
pub fn test_stages(log: &CallLog) -> StageTable {
    StageTable::with_builtins()
        .with_stage(logged("upper", log, |s| s.to_uppercase()))
        .with_stage(logged("same", log, |s| s.to_string()))
        .with_stage(logged("foo", log, |s| s.to_string()))
        .with_stage(logged("bar", log, |s| s.trim().to_uppercase()))
        .with_stage(failing("boom", log))
}

/// Resolver wrapper counting resolutions
pub struct CountingResolver {
    inner: StageTable,
    resolutions: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: StageTable) -> Self {
        Self {
            inner,
            resolutions: AtomicUsize::new(0),
        }
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StageResolver for CountingResolver {
    async fn resolve(
        &self,
        name: &str,
        config: &ResolverConfig,
    ) -> catena_core::Result<Arc<dyn Stage>> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        // Give concurrent callers a chance to interleave
        tokio::task::yield_now().await;
        self.inner.resolve(name, config).await
    }
}

/// Engine over the test stages, with `doc` mapped to the wildcard
pub async fn wildcard_engine(log: &CallLog) -> Catena {
    CatenaBuilder::new()
        .with_resolver(Arc::new(test_stages(log)))
        .map("doc", "*")
        .map("tpl", "template")
        .build()
        .await
        .expect("test engine builds")
}
