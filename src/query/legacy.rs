//! Best-effort reverse parsing of legacy free-text queries.
//!
//! Only `#tag` tokens and `"quoted/path"` tokens are recovered. Boolean
//! structure (`AND`, `OR`, negation, nesting) is discarded, so a complex
//! historical query can come back broader than it was written.

use std::sync::LazyLock;

use regex::Regex;

use super::filter::{Filter, split_list};

static QUOTED_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid quoted path regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|[\s(,!-])#([^\s#(),"]+)"#).expect("valid legacy tag regex")
});

/// Extracts tags and quoted folders from a legacy query string.
#[must_use]
pub fn parse_legacy_query(query: &str) -> Filter {
    let mut folders: Vec<String> = Vec::new();
    for capture in QUOTED_PATH_RE.captures_iter(query) {
        let folder = capture[1].trim();
        if !folder.is_empty() && !folders.iter().any(|known| known == folder) {
            folders.push(folder.to_owned());
        }
    }

    let unquoted = QUOTED_PATH_RE.replace_all(query, " ");
    let mut tags: Vec<String> = Vec::new();
    for capture in TAG_RE.captures_iter(&unquoted) {
        let tag = &capture[1];
        if !tags.iter().any(|known| known == tag) {
            tags.push(tag.to_owned());
        }
    }

    Filter {
        tags: tags.join(", "),
        folders: folders.join(", "),
        yaml_filters: Vec::new(),
    }
}

/// Reads the legacy "easy tag filter" shorthand (`#a #b` or `a, b`).
#[must_use]
pub fn parse_tag_shorthand(shorthand: &str) -> Filter {
    let tags: Vec<String> = shorthand
        .split(|c: char| c == ',' || c.is_whitespace())
        .flat_map(|token| split_list(token.trim_start_matches('#')))
        .collect();
    Filter {
        tags: tags.join(", "),
        ..Filter::default()
    }
}
