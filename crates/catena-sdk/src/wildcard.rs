//! Wildcard documents
//!
//! A wildcard document is split into blocks, each opened by a marker line
//! such as `">> markdown`. A block owns every following line until one of:
//! - a line indented less than the marker (the line stays with the parent)
//! - another marker at the same indentation (it opens a sibling block)
//! - the end of the document
//!
//! A marker indented deeper than the current one opens a child block, which
//! is compiled first; its result replaces its lines in the parent. Each
//! block's result is padded so every line is indented at least as far as
//! its marker.
//!
//! Indentation is a plain count of leading whitespace characters. Tabs and
//! spaces are not normalized against each other. An empty line has indent 0,
//! so it closes every block whose marker is indented; text after it at the
//! old indentation needs a new marker.
//!
//! Lines may end in `\n` or `\r\n`; compiled output always uses `\n`.

use crate::error::{Result, SdkError};
use crate::registry::PipelineRegistry;
use catena_core::Options;
use catena_parser::{indent_width, Marker};
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

/// A compiled block and the number of source lines it consumed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBlock {
    /// Compiled, re-indented text
    pub text: String,
    /// Source lines consumed, marker line included
    pub consumed: usize,
}

/// Split a document into lines, accepting both `\n` and `\r\n`
///
/// The trailing `\r` is dropped, so documents rejoined from these lines come
/// back with `\n` line endings.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Compile a whole wildcard document
///
/// Top-level blocks are compiled in order and joined with newlines.
/// Whitespace-only lines between top-level blocks are kept as they are.
pub async fn compile_document(
    registry: &PipelineRegistry,
    text: &str,
    options: &Options,
) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let lines = split_lines(text);
    let mut compiled = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let line = lines[cursor];
        if Marker::parse(line).is_none() && line.trim().is_empty() {
            compiled.push(line.to_string());
            cursor += 1;
            continue;
        }

        let block = compile_block(registry, &lines, cursor, options).await?;
        compiled.push(block.text);
        cursor += block.consumed;
    }

    Ok(compiled.join("\n"))
}

/// Compile the block whose marker line is `lines[start]`
pub fn compile_block<'a>(
    registry: &'a PipelineRegistry,
    lines: &'a [&'a str],
    start: usize,
    options: &'a Options,
) -> BoxFuture<'a, Result<CompiledBlock>> {
    async move {
        let marker = Marker::parse(lines[start]).ok_or_else(|| SdkError::MalformedMarker {
            line: start + 1,
            content: lines[start].to_string(),
        })?;
        let base = marker.indent;

        let mut members: Vec<String> = Vec::new();
        let mut cursor = start + 1;

        while cursor < lines.len() {
            let line = lines[cursor];
            if indent_width(line) < base {
                break;
            }

            match Marker::parse(line) {
                Some(nested) if nested.indent > base => {
                    let child = compile_block(registry, lines, cursor, options).await?;
                    members.push(child.text);
                    cursor += child.consumed;
                }
                // Same indentation: a sibling block starts here
                Some(_) => break,
                None => {
                    members.push(line.to_string());
                    cursor += 1;
                }
            }
        }

        let consumed = cursor - start;
        debug!(
            ext = %marker.extension,
            line = start + 1,
            base,
            consumed,
            "compiling wildcard block"
        );

        let body = members.join("\n");
        let output = registry.compile(&marker.extension, &body, options).await?;
        let text = output.force(options)?;

        Ok(CompiledBlock {
            text: pad_to_indent(&text, base),
            consumed,
        })
    }
    .boxed()
}

/// Indent every line of `text` to at least `base` characters
pub fn pad_to_indent(text: &str, base: usize) -> String {
    if base == 0 {
        return text.to_string();
    }

    text.split('\n')
        .map(|line| {
            let width = indent_width(line);
            if width < base {
                format!("{}{}", " ".repeat(base - width), line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
