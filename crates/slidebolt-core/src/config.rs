//! Pipeline configuration
//!
//! A [`Config`] is built once per deck by merging a caller-supplied TOML
//! override onto the built-in defaults and is immutable afterwards. The
//! merge is shallow: field-wise `#[serde(default)]` means a file that
//! overrides one key inherits every other default.
//!
//! Several settings can be given either as one value for every language or
//! as a per-language map. Those are modelled as the [`ConfigValue`] sum
//! type and consumed exclusively through its [`resolve`](ConfigValue::resolve)
//! rule, so every call site falls back identically.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default base URL of the compilation-visualization service
pub const DEFAULT_BASE_URL: &str = "https://slides.compiler-explorer.com";

/// Compiler id used when neither the block nor the config names one
pub const FALLBACK_COMPILER: &str = "g142";

/// Options string used when neither the block nor the config names one
pub const FALLBACK_OPTIONS: &str = "-O1";

/// Errors from loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A setting that applies to every language or varies per language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// One value regardless of language
    Scalar(String),
    /// Language identifier to value
    PerLanguage(BTreeMap<String, String>),
}

impl ConfigValue {
    /// Resolve this value for `language`
    ///
    /// A scalar wins unchanged whatever the language. A map yields its
    /// entry for `language` when present and non-empty, else `default`.
    pub fn resolve(&self, language: &str, default: &str) -> String {
        match self {
            ConfigValue::Scalar(value) => value.clone(),
            ConfigValue::PerLanguage(map) => match map.get(language) {
                Some(value) if !value.is_empty() => value.clone(),
                _ => default.to_string(),
            },
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Scalar(value.to_string())
    }
}

/// Resolve an optional setting; an absent value resolves to `default`
pub fn resolve(value: Option<&ConfigValue>, language: &str, default: &str) -> String {
    match value {
        Some(value) => value.resolve(language, default),
        None => default.to_string(),
    }
}

/// Deck-wide settings for block parsing and link building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the visualization service
    pub base_url: String,
    /// Source lines longer than this are reported (they still pass through)
    pub max_line_length: usize,
    /// Font scale for the editor pane
    pub editor_font_scale: f64,
    /// Font scale for the compiler pane
    pub compiler_font_scale: f64,
    /// Language assumed when a block names none
    pub default_language: String,
    /// Compiler id, per language or global
    pub default_compiler: Option<ConfigValue>,
    /// Compiler options, per language or global
    pub default_compiler_options: Option<ConfigValue>,
    /// Options appended after the primary options
    pub additional_compiler_options: Option<ConfigValue>,
    /// Pattern removed from source before it leaves for the service
    pub default_remove_regex: Option<ConfigValue>,
    /// Request Intel assembly syntax
    pub intel_syntax: bool,
    /// Request whitespace-trimmed assembly
    pub trim_asm_whitespace: bool,
    /// Strip common leading whitespace from display sources
    pub undent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_line_length: 50,
            editor_font_scale: 2.5,
            compiler_font_scale: 3.0,
            default_language: "c++".to_string(),
            default_compiler: Some(ConfigValue::from(FALLBACK_COMPILER)),
            default_compiler_options: Some(ConfigValue::from(FALLBACK_OPTIONS)),
            additional_compiler_options: Some(ConfigValue::from("-Wall -Wextra")),
            default_remove_regex: None,
            intel_syntax: true,
            trim_asm_whitespace: true,
            undent: true,
        }
    }
}

impl Config {
    /// Parse a config from a TOML string, missing keys keep their defaults
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a config from a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
