use std::sync::LazyLock;

use regex::Regex;

static CHECKBOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*(?:[-*+]|\d+[.)])\s+\[)([^\]])(\].*)$").expect("valid checkbox regex")
});

/// Flips the checkbox token of a markdown list item.
///
/// `[ ]` becomes `[x]`; any other mark becomes `[ ]`. Returns `None` when the
/// line is not a checkbox item.
#[must_use]
pub fn toggle_checkbox_line(line: &str) -> Option<String> {
    let captures = CHECKBOX_RE.captures(line)?;
    let mark = if &captures[2] == " " { "x" } else { " " };
    Some(format!("{}{mark}{}", &captures[1], &captures[3]))
}

/// Whether a checkbox line is marked done.
#[must_use]
pub fn is_checked_line(line: &str) -> Option<bool> {
    CHECKBOX_RE
        .captures(line)
        .map(|captures| &captures[2] != " ")
}
