use serde::{Deserialize, Serialize};

use crate::query::Filter;
use crate::time::TimeRangeConfig;

use super::runner::CountTarget;
use super::window::TimeField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesCountMode {
    #[default]
    #[serde(alias = "files")]
    Pages,
    Tasks,
}

impl From<SeriesCountMode> for CountTarget {
    fn from(mode: SeriesCountMode) -> Self {
        match mode {
            SeriesCountMode::Pages => Self::Files,
            SeriesCountMode::Tasks => Self::Tasks,
        }
    }
}

/// One named, independently filtered and time-windowed count of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub label: String,
    pub filter: Filter,
    pub count_mode: SeriesCountMode,
    pub time_field: TimeField,
    pub time_range: TimeRangeConfig,
}

impl Series {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, filter: Filter) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_count_mode(mut self, mode: SeriesCountMode) -> Self {
        self.count_mode = mode;
        self
    }

    #[must_use]
    pub fn with_time_range(mut self, field: TimeField, range: TimeRangeConfig) -> Self {
        self.time_field = field;
        self.time_range = range;
        self
    }

    /// Label, or `Series N` (1-based) when blank.
    #[must_use]
    pub fn display_label(&self, index: usize) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            format!("Series {}", index + 1)
        } else {
            label.to_owned()
        }
    }
}
