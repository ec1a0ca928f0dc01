//! slidebolt-core - annotated code blocks for compiler-visualization slides
//!
//! Takes annotated source blocks out of a slide deck and produces two
//! parallel artifacts per block: the full source for an external
//! compilation-visualization service and an elided display source for the
//! audience, plus the URL fragment that encodes the full source and its
//! compiler metadata for the service.
//!
//! # Example
//!
//! ```
//! use slidebolt_core::{build_url, link_for_block, parse_block, Config, LogReporter, RawBlock};
//!
//! let config = Config::default();
//! let block = RawBlock {
//!     text: "// setup\n  #include <cstdint>\nint sq(int n) { return n * n; }".to_string(),
//!     ..RawBlock::default()
//! };
//!
//! let mut reporter = LogReporter;
//! let parsed = parse_block(&config, &block, &mut reporter);
//!
//! // The service sees the setup region, the audience does not
//! assert!(parsed.source.contains("cstdint"));
//! assert_eq!(parsed.display_source, "int sq(int n) { return n * n; }");
//!
//! let url = build_url(&config, &link_for_block(&config, &parsed, &mut reporter));
//! assert!(url.starts_with("https://slides.compiler-explorer.com#"));
//! ```

pub mod block;
pub mod classify;
pub mod config;
pub mod extract;
pub mod link;
pub mod normalize;
pub mod redact;
pub mod report;

// Re-export main types and functions
pub use block::{parse_block, ParsedCodeBlock, RawBlock};
pub use classify::{classify_lines, ClassifiedLines};
pub use config::{resolve, Config, ConfigError, ConfigValue};
pub use extract::{extract_blocks, rewrite_deck, DeckBlock};
pub use link::{build_fragment, build_url, link_for_block};
pub use normalize::join_normalized;
pub use redact::redact;
pub use report::{CollectReporter, LogReporter, Reporter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
