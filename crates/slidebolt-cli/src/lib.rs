//! slidebolt CLI - command-line interface library
//!
//! Provides the CLI functionality for slidebolt:
//! - Process: rewrite a deck's annotated fences to their display source
//! - Links: print the service URL for each annotated block
//! - Show: dump the parsed block records as text or JSON
//!
//! # Binary Usage
//!
//! ```bash
//! # Rewrite a deck in place of stdout
//! slidebolt process deck.md --output deck.out.md
//!
//! # Print one compiler-visualization URL per block
//! slidebolt links deck.md
//!
//! # Inspect what each block resolved to
//! slidebolt show deck.md --format json
//! ```

pub mod app;

pub use app::{links_command, process_command, run_cli, show_command, OutputFormat};
