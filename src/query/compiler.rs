use tracing::trace;

use super::filter::{Filter, YamlFilter};
use super::yaml::YamlPredicate;

/// Output of compiling one [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFilter {
    /// Full query: folder, tag and YAML clauses combined with AND.
    pub query: String,
    /// Folder and tag clauses only; what the engine can select on natively.
    pub source: String,
    /// Frontmatter predicate applied after retrieval.
    pub yaml: YamlPredicate,
}

impl CompiledFilter {
    /// Empty query means "match everything".
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty()
    }
}

#[must_use]
pub fn compile_filter(filter: &Filter) -> CompiledFilter {
    let folder = folder_clause(&filter.folder_list());
    let tag = tag_clause(&filter.tag_list());
    let yaml = yaml_clause(&filter.yaml_filters);

    let source = combine_and([folder.clone(), tag.clone()]);
    let query = combine_and([folder, tag, yaml]);
    trace!(query = %query, source = %source, "compiled filter");

    CompiledFilter {
        query,
        source,
        yaml: YamlPredicate::from_filters(&filter.yaml_filters),
    }
}

/// OR-combines several filters into one query string.
///
/// A single unconstrained filter absorbs the whole disjunction, and an empty
/// list is unconstrained too.
#[must_use]
pub fn compile_filters(filters: &[Filter]) -> String {
    let mut queries: Vec<String> = filters
        .iter()
        .map(|filter| compile_filter(filter).query)
        .collect();

    if queries.is_empty() || queries.iter().any(String::is_empty) {
        return String::new();
    }
    if queries.len() == 1 {
        return queries.swap_remove(0);
    }

    queries
        .iter()
        .map(|query| group(query))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn tag_clause(tags: &[String]) -> Option<String> {
    or_group(tags.iter().map(|tag| format!("#{tag}")).collect())
}

fn folder_clause(folders: &[String]) -> Option<String> {
    let folders = folders
        .iter()
        .map(|folder| format!("\"{}\"", escape_literal(folder)))
        .collect();
    or_group(folders)
}

fn yaml_clause(filters: &[YamlFilter]) -> Option<String> {
    let clauses: Vec<String> = filters
        .iter()
        .filter_map(|filter| {
            let key = filter.key.trim();
            if key.is_empty() {
                return None;
            }
            let checks = filter
                .value_list()
                .iter()
                .map(|value| format!("contains({key}, \"{}\")", escape_literal(value)))
                .collect();
            or_group(checks)
        })
        .collect();

    match clauses.len() {
        0 => None,
        1 => clauses.into_iter().next(),
        _ => Some(clauses.join(" AND ")),
    }
}

fn or_group(parts: Vec<String>) -> Option<String> {
    match parts.len() {
        0 => None,
        1 => parts.into_iter().next(),
        _ => Some(format!("({})", parts.join(" OR "))),
    }
}

fn combine_and<const N: usize>(clauses: [Option<String>; N]) -> String {
    let present: Vec<String> = clauses.into_iter().flatten().collect();
    match present.len() {
        0 => String::new(),
        1 => present.into_iter().next().unwrap_or_default(),
        _ => present
            .iter()
            .map(|clause| group(clause))
            .collect::<Vec<_>>()
            .join(" AND "),
    }
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Parenthesizes `expr` unless it is already a single operand.
fn group(expr: &str) -> String {
    if needs_group(expr) {
        format!("({expr})")
    } else {
        expr.to_owned()
    }
}

/// True when `expr` has whitespace outside quotes and parentheses.
fn needs_group(expr: &str) -> bool {
    let mut depth = 0_i32;
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in expr.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '(' if !in_quotes => depth += 1,
            ')' if !in_quotes => depth -= 1,
            c if c.is_whitespace() && !in_quotes && depth == 0 => return true,
            _ => {}
        }
    }
    false
}
