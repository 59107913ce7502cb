//! Catena Parser - chain specification and wildcard marker syntax
//!
//! Pure, synchronous parsing:
//! - chain specifications such as `template>@>html` into a [`ChainSpec`]
//! - wildcard marker lines such as `  ">> markdown` into a [`Marker`]

pub mod chain;
pub mod error;
pub mod marker;

/// Separates stage names in a chain specification
pub const CHAIN_DELIMITER: char = '>';

/// Chain token marking the force-to-text boundary
pub const FORCE_TO_TEXT: &str = "@";

/// Mapping value that dispatches per block instead of per document
pub const WILDCARD: &str = "*";

/// Token that opens a wildcard block
pub const MARKER_TOKEN: &str = ">>";

// Re-export main parser types
pub use chain::{ChainParser, ChainSpec};
pub use error::{ParseError, Result};
pub use marker::{indent_width, Marker};
