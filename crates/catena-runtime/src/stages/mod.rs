//! Built-in stage kinds
//!
//! Each kind implements [`catena_core::Stage`]:
//! - [`PassthroughStage`]: identity, for kinds that need no compilation
//! - [`TemplateStage`]: `{{ key }}` substitution returning a deferred renderer
//! - [`CommandStage`]: pipes the input through an external program
//! - [`FnStage`]: adapts a closure

mod command;
mod func;
mod passthrough;
mod template;

pub use command::CommandStage;
pub use func::FnStage;
pub use passthrough::PassthroughStage;
pub use template::TemplateStage;
