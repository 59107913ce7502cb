//! Catena Compiler - chain specification to stage list
//!
//! This crate turns a chain specification string into a [`CompiledChain`]:
//! the parsed spec plus one resolved stage handle per stage name.

pub mod compiler;
pub mod error;

// Re-export main types
pub use compiler::{ChainCompiler, CompiledChain};
pub use error::{CompileError, Result};
