use serde::{Deserialize, Serialize};

use crate::core::GridMetrics;
use crate::core::lenient::{lenient_f64, lenient_u32};
use crate::error::{DashboardError, DashboardResult};
use crate::widgets::{Widget, default_widgets};

pub const DEFAULT_COLUMNS: u32 = 12;
pub const DEFAULT_ROW_HEIGHT: f64 = 80.0;
pub const DEFAULT_GAP: f64 = 16.0;

/// Whether widget geometry is in grid cells or absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutUnit {
    #[default]
    Grid,
    Px,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(default = "default_columns", deserialize_with = "lenient_u32")]
    pub columns: u32,
    #[serde(default = "default_row_height", deserialize_with = "lenient_f64")]
    pub row_height: f64,
    #[serde(default = "default_gap", deserialize_with = "lenient_f64")]
    pub gap: f64,
    #[serde(default)]
    pub unit: LayoutUnit,
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            row_height: DEFAULT_ROW_HEIGHT,
            gap: DEFAULT_GAP,
            unit: LayoutUnit::Grid,
            widgets: Vec::new(),
        }
    }
}

impl Layout {
    #[must_use]
    pub fn new(columns: u32, row_height: f64, gap: f64) -> Self {
        Self {
            columns,
            row_height,
            gap,
            ..Self::default()
        }
    }

    /// Layout of a fresh dashboard with the default widget set.
    #[must_use]
    pub fn with_default_widgets(mut self) -> Self {
        self.widgets = default_widgets();
        self
    }

    #[must_use]
    pub fn with_widgets(mut self, widgets: Vec<Widget>) -> Self {
        self.widgets = widgets;
        self
    }

    #[must_use]
    pub fn metrics(&self, padding: f64) -> GridMetrics {
        GridMetrics::new(self.columns, self.row_height, self.gap, padding)
    }

    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.id == id)
    }

    pub fn widget_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|widget| widget.id == id)
    }

    #[must_use]
    pub fn contains_widget(&self, id: &str) -> bool {
        self.widget(id).is_some()
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DashboardError::InvalidData(format!("failed to serialize layout: {e}")))
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DashboardError::InvalidData(format!("failed to parse layout: {e}")))
    }
}

fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT
}

fn default_gap() -> f64 {
    DEFAULT_GAP
}
