//! Indentation normalization
//!
//! Trims blank lines off both ends of a line sequence and, when asked,
//! strips the common leading whitespace shared by every non-blank line
//! ("undent"). The input slice is only borrowed; callers keep their copy.

/// Join `lines` with newlines, dropping leading and trailing blank lines
///
/// With `undent`, the minimum leading-whitespace run across the non-blank
/// lines is stripped from every remaining line. Blank lines do not
/// participate in the minimum; a blank line shorter than the strip count
/// simply becomes empty. An all-blank input yields the empty string.
pub fn join_normalized<S: AsRef<str>>(lines: &[S], undent: bool) -> String {
    let window = match (
        lines.iter().position(|l| !is_blank(l.as_ref())),
        lines.iter().rposition(|l| !is_blank(l.as_ref())),
    ) {
        (Some(start), Some(end)) => &lines[start..=end],
        _ => return String::new(),
    };

    if !undent {
        return window
            .iter()
            .map(|l| l.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
    }

    let indent = window
        .iter()
        .filter(|l| !is_blank(l.as_ref()))
        .map(|l| leading_whitespace(l.as_ref()))
        .min()
        .unwrap_or(0);

    window
        .iter()
        .map(|l| l.as_ref().chars().skip(indent).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Length in chars of a line's leading whitespace run
fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
