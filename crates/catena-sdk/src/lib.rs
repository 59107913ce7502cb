//! Catena SDK
//!
//! High-level API for compiling documents through extension-selected chains:
//! - [`PipelineRegistry`]: extension to chain mapping with a compiled-pipeline cache
//! - [`wildcard`]: per-block dispatch for documents carrying `>>` markers
//! - [`Catena`]: the engine facade, built with [`CatenaBuilder`]

pub mod builder;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod registry;
pub mod wildcard;

// Re-export main types
pub use builder::CatenaBuilder;
pub use config::{CommandConfig, EngineConfig};
pub use defaults::{builtin_default, ConventionalDefaults, DefaultChainResolver, BUILTIN_DEFAULTS};
pub use engine::Catena;
pub use error::{Result, SdkError};
pub use registry::{MappingTarget, PipelineRegistry};

// Re-export commonly used types from dependencies
pub use catena_core::{Options, Output, Renderer, ResolverConfig, Stage, StageResolver};
pub use catena_runtime::{ForceMode, Pipeline, StageTable};
