//! Catena Runtime - execution of compiled chains
//!
//! This crate provides the stage runner that threads text through a list of
//! stages, the executable [`Pipeline`] built from a compiled chain, the
//! built-in stage kinds, and an in-memory stage resolver.

pub mod error;
pub mod pipeline;
pub mod resolver;
pub mod runner;
pub mod stages;

// Re-export main types
pub use error::{Result, RuntimeError};
pub use pipeline::Pipeline;
pub use resolver::StageTable;
pub use runner::{ForceMode, StageRunner};
pub use stages::{CommandStage, FnStage, PassthroughStage, TemplateStage};
