use serde::{Deserialize, Serialize};

use crate::query::{FieldValue, Frontmatter};

/// A note as reported by the query engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Frontmatter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_stem(&path).to_owned();
        Self {
            path,
            name,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.frontmatter
            .get_or_insert_with(Frontmatter::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_ctime(mut self, ctime: impl Into<String>) -> Self {
        self.ctime = Some(ctime.into());
        self
    }

    #[must_use]
    pub fn with_mtime(mut self, mtime: impl Into<String>) -> Self {
        self.mtime = Some(mtime.into());
        self
    }

    /// `name` when present, otherwise the file stem of `path`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            file_stem(&self.path)
        } else {
            &self.name
        }
    }
}

/// A checkbox item as reported by the query engine. `line` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub path: String,
    pub line: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_ctime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_mtime: Option<String>,
}

impl Task {
    #[must_use]
    pub fn new(path: impl Into<String>, line: u32, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            line,
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    #[must_use]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_file_times(mut self, ctime: Option<&str>, mtime: Option<&str>) -> Self {
        self.file_ctime = ctime.map(str::to_owned);
        self.file_mtime = mtime.map(str::to_owned);
        self
    }
}

/// Last path segment without a trailing `.md`.
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let file = path.rsplit('/').next().unwrap_or(path);
    file.strip_suffix(".md").unwrap_or(file)
}
