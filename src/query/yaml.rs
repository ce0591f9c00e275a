use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::filter::YamlFilter;

/// Parsed frontmatter of a page, in document order.
pub type Frontmatter = IndexMap<String, FieldValue>;

/// A frontmatter value as reported by the data source.
///
/// Date-shaped strings deserialize into the date variants so they coerce to
/// canonical ISO-8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(String),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
}

impl FieldValue {
    /// Canonical string forms used for predicate matching and grouping.
    ///
    /// Lists flatten into their elements; null and maps coerce to nothing.
    #[must_use]
    pub fn coerce_strings(&self) -> Vec<String> {
        match self {
            Self::Null | Self::Map(_) => Vec::new(),
            Self::Bool(value) => vec![value.to_string()],
            Self::Integer(value) => vec![value.to_string()],
            Self::Float(value) => vec![value.to_string()],
            Self::DateTime(value) => vec![value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()],
            Self::Date(value) => vec![value.format("%Y-%m-%d").to_string()],
            Self::Text(value) => vec![value.trim().to_owned()],
            Self::List(items) => items.iter().flat_map(Self::coerce_strings).collect(),
        }
    }

    /// Missing-equivalent values: null, blank text, and empty collections.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(value) => value.trim().is_empty(),
            Self::List(items) => items.iter().all(Self::is_blank),
            Self::Map(entries) => entries.is_empty(),
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) | Self::DateTime(_) | Self::Date(_) => {
                false
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Looks a key up exactly, then ASCII case-insensitively.
#[must_use]
pub fn lookup_field<'a>(frontmatter: &'a Frontmatter, key: &str) -> Option<&'a FieldValue> {
    frontmatter.get(key).or_else(|| {
        frontmatter
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlClause {
    pub key: String,
    pub values: Vec<String>,
}

/// Client-side frontmatter predicate: AND across clauses, OR within a clause.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YamlPredicate {
    clauses: Vec<YamlClause>,
}

impl YamlPredicate {
    #[must_use]
    pub fn from_filters(filters: &[YamlFilter]) -> Self {
        let clauses = filters
            .iter()
            .filter_map(|filter| {
                let key = filter.key.trim();
                let values = filter.value_list();
                if key.is_empty() || values.is_empty() {
                    return None;
                }
                Some(YamlClause {
                    key: key.to_owned(),
                    values,
                })
            })
            .collect();
        Self { clauses }
    }

    #[must_use]
    pub fn clauses(&self) -> &[YamlClause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// An empty predicate accepts everything, including pages without frontmatter.
    #[must_use]
    pub fn matches(&self, frontmatter: Option<&Frontmatter>) -> bool {
        if self.clauses.is_empty() {
            return true;
        }
        let Some(frontmatter) = frontmatter else {
            return false;
        };
        self.clauses.iter().all(|clause| {
            lookup_field(frontmatter, &clause.key).is_some_and(|value| {
                value
                    .coerce_strings()
                    .iter()
                    .any(|candidate| clause.values.iter().any(|wanted| wanted == candidate))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use chrono::NaiveDate;

    #[test]
    fn scalars_coerce_canonically() {
        assert_eq!(FieldValue::from(true).coerce_strings(), vec!["true"]);
        assert_eq!(FieldValue::from(3_i64).coerce_strings(), vec!["3"]);
        assert_eq!(FieldValue::from(1.0_f64).coerce_strings(), vec!["1"]);
        assert_eq!(FieldValue::from(2.5_f64).coerce_strings(), vec!["2.5"]);
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).expect("valid date");
        assert_eq!(FieldValue::from(date).coerce_strings(), vec!["2024-01-05"]);
        assert!(FieldValue::Null.coerce_strings().is_empty());
    }

    #[test]
    fn date_shaped_json_strings_become_dates() {
        let value: FieldValue = serde_json::from_str("\"2024-01-05\"").expect("parse");
        assert!(matches!(value, FieldValue::Date(_)));
        let value: FieldValue = serde_json::from_str("\"2024-01-05T08:30:00\"").expect("parse");
        assert_eq!(value.coerce_strings(), vec!["2024-01-05T08:30:00"]);
        let value: FieldValue = serde_json::from_str("\"done\"").expect("parse");
        assert_eq!(value, FieldValue::Text("done".to_owned()));
    }
}
