use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Frontmatter predicate: `key` must hold one of the comma-separated `values`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct YamlFilter {
    pub key: String,
    pub values: String,
}

impl YamlFilter {
    #[must_use]
    pub fn new(key: impl Into<String>, values: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: values.into(),
        }
    }

    /// Trimmed non-empty values.
    #[must_use]
    pub fn value_list(&self) -> Vec<String> {
        split_list(&self.values)
    }

    /// A clause participates only with a key and at least one value.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.key.trim().is_empty() && !self.value_list().is_empty()
    }
}

/// "Match these notes": tags AND folders AND frontmatter predicates.
///
/// Every part is optional. A filter with no parts matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Filter {
    pub tags: String,
    pub folders: String,
    pub yaml_filters: Vec<YamlFilter>,
}

impl Filter {
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    #[must_use]
    pub fn with_folders(mut self, folders: impl Into<String>) -> Self {
        self.folders = folders.into();
        self
    }

    #[must_use]
    pub fn with_yaml(mut self, key: impl Into<String>, values: impl Into<String>) -> Self {
        self.yaml_filters.push(YamlFilter::new(key, values));
        self
    }

    /// Distinct tag names without the leading `#`. Bare `#` entries are dropped.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        distinct_entries(&self.tags, |entry| entry.trim_start_matches('#').trim())
    }

    /// Distinct folder paths with surrounding quotes removed.
    #[must_use]
    pub fn folder_list(&self) -> Vec<String> {
        distinct_entries(&self.folders, |entry| entry.trim_matches('"').trim())
    }

    #[must_use]
    pub fn has_yaml_clauses(&self) -> bool {
        self.yaml_filters.iter().any(YamlFilter::is_active)
    }

    /// True when no clause would constrain the result.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.tag_list().is_empty() && self.folder_list().is_empty() && !self.has_yaml_clauses()
    }
}

fn distinct_entries(input: &str, normalize: impl Fn(&str) -> &str) -> Vec<String> {
    input
        .split(',')
        .map(|entry| normalize(entry.trim()))
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Splits a comma list, trimming entries and dropping empty ones.
#[must_use]
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
