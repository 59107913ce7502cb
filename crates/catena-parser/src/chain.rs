//! Chain specification parser
//!
//! Grammar: `chain := token ('>' token)*`, where a token is either the
//! force-to-text boundary `@` or a stage name. Stage names before the
//! boundary form the pre-segment; at most one stage may follow it.

use crate::error::{ParseError, Result};
use crate::{CHAIN_DELIMITER, FORCE_TO_TEXT, WILDCARD};
use std::fmt;

/// A parsed chain, stage names only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    /// Stages executed unconditionally, in order
    pub pre: Vec<String>,

    /// The single stage that receives forced text
    pub post: Option<String>,

    /// Whether the boundary token appeared at all
    pub forced: bool,
}

impl ChainSpec {
    /// Total number of stages, both segments
    pub fn stage_count(&self) -> usize {
        self.pre.len() + usize::from(self.post.is_some())
    }

    /// All stage names in execution order
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.pre.iter().chain(self.post.iter()).map(String::as_str)
    }
}

impl fmt::Display for ChainSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<&str> = self.pre.iter().map(String::as_str).collect();
        if self.forced {
            tokens.push(FORCE_TO_TEXT);
        }
        if let Some(post) = &self.post {
            tokens.push(post);
        }
        let delimiter = CHAIN_DELIMITER.to_string();
        f.write_str(&tokens.join(&delimiter))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Pre,
    Post,
}

/// Chain specification parser
pub struct ChainParser;

impl ChainParser {
    /// Parse a chain specification
    pub fn parse(spec: &str) -> Result<ChainSpec> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyChain);
        }

        let mut pre = Vec::new();
        let mut post = Vec::new();
        let mut cursor = Cursor::Pre;

        for (position, token) in trimmed.split(CHAIN_DELIMITER).enumerate() {
            let token = token.trim();

            if token.is_empty() {
                return Err(ParseError::EmptyStage {
                    spec: trimmed.to_string(),
                    position,
                });
            }

            if token == FORCE_TO_TEXT {
                if cursor == Cursor::Post {
                    return Err(ParseError::RepeatedBoundary {
                        spec: trimmed.to_string(),
                    });
                }
                cursor = Cursor::Post;
                continue;
            }

            if token == WILDCARD {
                return Err(ParseError::WildcardInChain {
                    spec: trimmed.to_string(),
                });
            }

            match cursor {
                Cursor::Pre => pre.push(token.to_string()),
                Cursor::Post => post.push(token.to_string()),
            }
        }

        if post.len() > 1 {
            return Err(ParseError::MultiplePostStages {
                spec: trimmed.to_string(),
                count: post.len(),
            });
        }

        Ok(ChainSpec {
            pre,
            post: post.pop(),
            forced: cursor == Cursor::Post,
        })
    }
}
