use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::query::lookup_field;
use crate::source::Page;

pub const UNTAGGED_BUCKET: &str = "(untagged)";
pub const ROOT_BUCKET: &str = "(root)";
pub const EMPTY_BUCKET: &str = "(empty)";

/// One labelled value of a chart or stat series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    pub name: String,
    pub value: f64,
}

impl NamedValue {
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Bucketing key for group-mode charts.
///
/// Persisted as a plain string: `tag`, `folder`, `file`, or any other text as
/// a frontmatter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GroupField {
    #[default]
    Tag,
    Folder,
    File,
    Frontmatter(String),
}

impl From<String> for GroupField {
    fn from(value: String) -> Self {
        match value.trim() {
            "" | "tag" | "tags" => Self::Tag,
            "folder" => Self::Folder,
            "file" => Self::File,
            key => Self::Frontmatter(key.to_owned()),
        }
    }
}

impl From<GroupField> for String {
    fn from(field: GroupField) -> Self {
        match field {
            GroupField::Tag => "tag".to_owned(),
            GroupField::Folder => "folder".to_owned(),
            GroupField::File => "file".to_owned(),
            GroupField::Frontmatter(key) => key,
        }
    }
}

type Buckets = SmallVec<[String; 4]>;

/// Counts pages per bucket, largest first.
///
/// Ties keep first-seen order. A page contributes at most once to each
/// bucket. `limit` of `None` or `Some(0)` keeps every bucket.
#[must_use]
pub fn group_pages(pages: &[Page], field: &GroupField, limit: Option<usize>) -> Vec<NamedValue> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for page in pages {
        for bucket in page_buckets(page, field) {
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }

    let mut grouped: Vec<(String, usize)> = counts.into_iter().collect();
    grouped.sort_by(|left, right| right.1.cmp(&left.1));
    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        grouped.truncate(limit);
    }

    grouped
        .into_iter()
        .map(|(name, count)| NamedValue::new(name, count as f64))
        .collect()
}

fn page_buckets(page: &Page, field: &GroupField) -> Buckets {
    let mut buckets = Buckets::new();
    match field {
        GroupField::Tag => {
            for tag in &page.tags {
                push_unique(&mut buckets, tag.trim().trim_start_matches('#'));
            }
            if buckets.is_empty() {
                buckets.push(UNTAGGED_BUCKET.to_owned());
            }
        }
        GroupField::Folder => {
            let folder = page
                .path
                .rfind('/')
                .map(|index| &page.path[..index])
                .filter(|folder| !folder.is_empty());
            buckets.push(folder.unwrap_or(ROOT_BUCKET).to_owned());
        }
        GroupField::File => buckets.push(page.display_name().to_owned()),
        GroupField::Frontmatter(key) => {
            let value = page
                .frontmatter
                .as_ref()
                .and_then(|frontmatter| lookup_field(frontmatter, key));
            if let Some(value) = value {
                for text in value.coerce_strings() {
                    push_unique(&mut buckets, &text);
                }
            }
            if buckets.is_empty() {
                buckets.push(EMPTY_BUCKET.to_owned());
            }
        }
    }
    buckets
}

fn push_unique(buckets: &mut Buckets, name: &str) {
    if !name.is_empty() && !buckets.iter().any(|known| known == name) {
        buckets.push(name.to_owned());
    }
}
