//! Annotated fence extraction from Markdown decks
//!
//! The pipeline itself is host-agnostic; this is the thin deck-side layer
//! that finds fenced code blocks opting into processing and can splice
//! their display sources back into the deck text.
//!
//! A fence opts in by carrying a `ce` token in its info string:
//!
//! ````markdown
//! ```cpp ce compiler=g142 options="-O2 -Wall" remove-regex=";.*"
//! int square(int n) { return n * n; }
//! ```
//! ````
//!
//! The first bare info token (other than `ce`) is the language; `compiler`,
//! `options`, `remove-regex` and `language` are accepted as `key=value`
//! attributes, split with shell-style quoting so option strings containing
//! spaces survive. Fences without the token pass through untouched.

use crate::block::RawBlock;
use crate::report::Reporter;

/// Info-string token that opts a fence into processing
const CE_TOKEN: &str = "ce";

/// One annotated fence found in a deck
#[derive(Debug, Clone, PartialEq)]
pub struct DeckBlock {
    /// The block text and attributes, ready for parsing
    pub raw: RawBlock,
    /// Zero-based line index of the first body line
    pub body_start: usize,
    /// Zero-based line index just past the last body line
    pub body_end: usize,
}

#[derive(Debug, Default)]
struct FenceAttrs {
    language: Option<String>,
    compiler: Option<String>,
    options: Option<String>,
    remove_regex: Option<String>,
}

/// Scan deck text for annotated fences, in document order
///
/// A fence that never closes runs to the end of the input and is reported;
/// its content is still processed. Fences inside other fences are treated
/// as body text.
pub fn extract_blocks(text: &str, reporter: &mut dyn Reporter) -> Vec<DeckBlock> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let trimmed = lines[i].trim_start();
        if !trimmed.starts_with("```") {
            i += 1;
            continue;
        }

        let info = trimmed.trim_start_matches('`').trim();
        let attrs = parse_info_string(info);

        let body_start = i + 1;
        let mut body_end = lines.len();
        let mut terminated = false;
        for (j, line) in lines.iter().enumerate().skip(body_start) {
            let candidate = line.trim();
            if candidate.starts_with("```") && candidate.chars().all(|c| c == '`') {
                body_end = j;
                terminated = true;
                break;
            }
        }

        if let Some(attrs) = attrs {
            if !terminated {
                reporter.warn(&format!("Unterminated code fence starting at line {}", i + 1));
            }
            blocks.push(DeckBlock {
                raw: RawBlock {
                    text: lines[body_start..body_end].join("\n"),
                    language: attrs.language,
                    compiler: attrs.compiler,
                    options: attrs.options,
                    remove_regex: attrs.remove_regex,
                },
                body_start,
                body_end,
            });
        }

        i = if terminated { body_end + 1 } else { body_end };
    }

    blocks
}

/// Parse a fence info string; `None` means the fence is not annotated
fn parse_info_string(info: &str) -> Option<FenceAttrs> {
    let tokens = shlex::split(info)?;
    if !tokens.iter().any(|t| t.as_str() == CE_TOKEN) {
        return None;
    }

    let mut attrs = FenceAttrs::default();
    for token in &tokens {
        if token.as_str() == CE_TOKEN {
            continue;
        }
        match token.split_once('=') {
            Some(("language", value)) => attrs.language = Some(value.to_string()),
            Some(("compiler", value)) => attrs.compiler = Some(value.to_string()),
            Some(("options", value)) => attrs.options = Some(value.to_string()),
            Some(("remove-regex", value)) => attrs.remove_regex = Some(value.to_string()),
            // Unknown attributes are ignored, like unknown data attributes
            Some(_) => {}
            None => {
                if attrs.language.is_none() {
                    attrs.language = Some(token.clone());
                }
            }
        }
    }
    Some(attrs)
}

/// Splice replacement bodies back into the deck text
///
/// `replacements` must be in document order with non-overlapping spans, as
/// produced by [`extract_blocks`]. Each fence body is swapped for the given
/// text (typically the block's display source); everything else, including
/// the fence lines themselves, is preserved.
pub fn rewrite_deck(text: &str, replacements: &[(DeckBlock, String)]) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut pending = replacements.iter().peekable();
    let mut i = 0;

    while i < lines.len() {
        if let Some((block, body)) = pending.peek() {
            if block.body_start == i {
                if !body.is_empty() {
                    out.extend(body.split('\n').map(str::to_string));
                }
                i = block.body_end;
                pending.next();
                continue;
            }
        }
        out.push(lines[i].to_string());
        i += 1;
    }

    out.join("\n")
}
