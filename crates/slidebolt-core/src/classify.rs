//! Line classification for annotated blocks
//!
//! One left-to-right pass over the block's lines produces two parallel
//! sequences: `full` (everything, for the compilation service) and
//! `display` (the audience-facing subset). Two independent flags drive the
//! split:
//!
//! - `hidden`, toggled by `///hide` / `///unhide` marker lines. Marker
//!   lines are consumed entirely; they appear in neither sequence and are
//!   not length-checked.
//! - `setup`, set by a line that is exactly `// setup` and cleared by the
//!   first later non-empty line whose first character is not a space.
//!   Blank and whitespace-only lines never end a setup region.
//!
//! Every non-marker line lands in `full`; it also lands in `display` when
//! neither flag is set. Lines longer than the configured threshold are
//! reported through the injected [`Reporter`].

use std::sync::OnceLock;

use regex::Regex;

use crate::report::Reporter;

/// A line that is exactly this begins a setup region
const SETUP_MARKER: &str = "// setup";

/// Marker lines: optional whitespace, three slashes, `hide` or `unhide`
fn hide_marker() -> &'static Regex {
    static HIDE_RE: OnceLock<Regex> = OnceLock::new();
    HIDE_RE.get_or_init(|| Regex::new(r"^\s*///\s*((un)?hide)\s*$").expect("valid marker pattern"))
}

/// The two parallel line sequences produced by classification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedLines {
    /// Every non-marker line, in input order
    pub full: Vec<String>,
    /// The non-marker lines outside hidden and setup regions
    pub display: Vec<String>,
}

/// Split `lines` into full and display sequences
///
/// Lines whose character count exceeds `max_line_length` are reported with
/// their original text; classification continues regardless.
pub fn classify_lines(
    lines: &[&str],
    max_line_length: usize,
    reporter: &mut dyn Reporter,
) -> ClassifiedLines {
    let mut out = ClassifiedLines::default();
    let mut hidden = false;
    let mut setup = false;

    for &line in lines {
        if let Some(caps) = hide_marker().captures(line) {
            hidden = &caps[1] == "hide";
            continue;
        }

        if line == SETUP_MARKER {
            setup = true;
        } else if !line.is_empty() && !line.starts_with(' ') {
            setup = false;
        }

        out.full.push(line.to_string());
        if !hidden && !setup {
            out.display.push(line.to_string());
        }
        if line.chars().count() > max_line_length {
            reporter.warn(&format!("Line too long: \"{}\"", line));
        }
    }

    out
}
