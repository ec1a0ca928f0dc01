//! Annotated block parsing
//!
//! Turns one [`RawBlock`] plus the deck [`Config`] into a fully resolved
//! [`ParsedCodeBlock`]. Parsing never fails: missing attributes and config
//! keys degrade to documented defaults, and the only reported conditions
//! are over-length lines (here) and invalid redact patterns (later, at
//! link-build time).

use serde::Serialize;

use crate::classify::classify_lines;
use crate::config::{resolve, Config, FALLBACK_COMPILER, FALLBACK_OPTIONS};
use crate::normalize::join_normalized;
use crate::report::Reporter;

/// One annotated block as found in the deck
///
/// The literal multi-line text plus the block's optional per-attribute
/// overrides, which take precedence over the deck configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBlock {
    /// Literal block text, lines separated by `\n`
    pub text: String,
    /// Language override
    pub language: Option<String>,
    /// Compiler id override
    pub compiler: Option<String>,
    /// Compiler options override
    pub options: Option<String>,
    /// Redact pattern override
    pub remove_regex: Option<String>,
}

/// The resolved output record for one block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCodeBlock {
    /// Resolved language tag
    pub language: String,
    /// Resolved compiler id
    pub compiler: String,
    /// Resolved primary options string
    pub options: String,
    /// Complete source including hidden and setup regions, never undented
    pub source: String,
    /// Audience-facing source, undented when the config says so
    pub display_source: String,
    /// Pattern to strip from `source` before it leaves for the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_regex: Option<String>,
}

/// Parse one annotated block against the deck configuration
pub fn parse_block(config: &Config, block: &RawBlock, reporter: &mut dyn Reporter) -> ParsedCodeBlock {
    let lines: Vec<&str> = block.text.split('\n').collect();
    let classified = classify_lines(&lines, config.max_line_length, reporter);

    let language = block
        .language
        .clone()
        .unwrap_or_else(|| config.default_language.clone());
    let compiler = block.compiler.clone().unwrap_or_else(|| {
        resolve(config.default_compiler.as_ref(), &language, FALLBACK_COMPILER)
    });
    let options = block.options.clone().unwrap_or_else(|| {
        resolve(
            config.default_compiler_options.as_ref(),
            &language,
            FALLBACK_OPTIONS,
        )
    });
    let remove_regex = block.remove_regex.clone().or_else(|| {
        let pattern = resolve(config.default_remove_regex.as_ref(), &language, "");
        (!pattern.is_empty()).then_some(pattern)
    });

    ParsedCodeBlock {
        language,
        compiler,
        options,
        source: join_normalized(&classified.full, false),
        display_source: join_normalized(&classified.display, config.undent),
        remove_regex,
    }
}
