//! Catena Core - Core types and definitions for the catena compile-chain engine
//!
//! This crate provides the fundamental types used across the catena workspace:
//! - Compiler options threaded through every stage
//! - Stage output values (plain text or deferred renderers)
//! - The `Stage` and `StageResolver` capability traits
//! - Error types

pub mod error;
pub mod options;
pub mod output;
pub mod stage;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use options::Options;
pub use output::{Output, Renderer};
pub use stage::{ResolverConfig, Stage, StageResolver};
