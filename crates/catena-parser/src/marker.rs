//! Wildcard marker lines
//!
//! A marker line opens a block: optional leading whitespace, an optional
//! quote, the `>>` token, optional whitespace, then a bare extension.
//!
//! ```text
//! ">> markdown
//!     '>> css
//! ```

use crate::MARKER_TOKEN;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r#"^(\s*)['"]?{}\s*([^\s'"]+)"#, regex::escape(MARKER_TOKEN));
    Regex::new(&pattern).expect("marker pattern is valid")
});

/// A recognized marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Leading whitespace character count
    pub indent: usize,

    /// Extension tag selecting the block's chain
    pub extension: String,
}

impl Marker {
    /// Recognize a marker line, `None` if `line` is not one
    pub fn parse(line: &str) -> Option<Marker> {
        let captures = MARKER_PATTERN.captures(line)?;
        Some(Marker {
            indent: captures[1].chars().count(),
            extension: captures[2].to_string(),
        })
    }
}

/// Leading whitespace character count
///
/// Tabs and spaces both count as one character; they are not normalized
/// against each other.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
