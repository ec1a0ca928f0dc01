//! Best-effort redaction of outgoing source text
//!
//! Removes regex matches from source before it leaves for the external
//! service. This is a convenience for keeping slide scaffolding out of the
//! shared link, not a security boundary: a pattern that fails to compile
//! is reported and the text passes through unchanged.

use regex::Regex;

use crate::report::Reporter;

/// Remove every match of `pattern` from `text`
///
/// An empty pattern is a no-op. An invalid pattern warns once through
/// `reporter` and returns `text` unmodified; it is never an error.
pub fn redact(text: &str, pattern: &str, reporter: &mut dyn Reporter) -> String {
    if pattern.is_empty() {
        return text.to_string();
    }

    match Regex::new(pattern) {
        Ok(re) => re.replace_all(text, "").into_owned(),
        Err(err) => {
            reporter.warn(&format!("Invalid regex pattern: {}: {}", pattern, err));
            text.to_string()
        }
    }
}
