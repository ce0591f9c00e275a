use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::layout::{
    DEFAULT_COLLISION_ITERATION_LIMIT, DEFAULT_COLUMNS, DEFAULT_GAP, DEFAULT_ROW_HEIGHT, Layout,
    LayoutUnit,
};
use crate::time::{TimePreset, default_time_presets};

/// Public dashboard bootstrap configuration.
///
/// Every field has a default so hosts can persist only what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    #[serde(default = "default_gap")]
    pub gap: f64,
    #[serde(default = "default_padding")]
    pub padding: f64,
    #[serde(default)]
    pub canvas_unit: LayoutUnit,
    #[serde(default = "default_min_widget_px")]
    pub min_widget_px: f64,
    #[serde(default = "default_collision_iteration_limit")]
    pub collision_iteration_limit: usize,
    #[serde(default = "default_time_presets")]
    pub time_presets: Vec<TimePreset>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            row_height: default_row_height(),
            gap: default_gap(),
            padding: default_padding(),
            canvas_unit: LayoutUnit::default(),
            min_widget_px: default_min_widget_px(),
            collision_iteration_limit: default_collision_iteration_limit(),
            time_presets: default_time_presets(),
        }
    }
}

impl DashboardConfig {
    /// Sets grid metrics for fresh layouts.
    #[must_use]
    pub fn with_grid(mut self, columns: u32, row_height: f64, gap: f64) -> Self {
        self.columns = columns;
        self.row_height = row_height;
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the unit new dashboards are migrated to once a container is known.
    #[must_use]
    pub fn with_canvas_unit(mut self, unit: LayoutUnit) -> Self {
        self.canvas_unit = unit;
        self
    }

    #[must_use]
    pub fn with_min_widget_px(mut self, min_widget_px: f64) -> Self {
        self.min_widget_px = min_widget_px;
        self
    }

    #[must_use]
    pub fn with_collision_iteration_limit(mut self, limit: usize) -> Self {
        self.collision_iteration_limit = limit;
        self
    }

    #[must_use]
    pub fn with_time_presets(mut self, presets: Vec<TimePreset>) -> Self {
        self.time_presets = presets;
        self
    }

    /// Grid layout with these metrics and the default widget set.
    #[must_use]
    pub fn default_layout(&self) -> Layout {
        Layout::new(self.columns, self.row_height, self.gap).with_default_widgets()
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.columns == 0 {
            return Err(DashboardError::InvalidData(
                "columns must be at least 1".to_owned(),
            ));
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(DashboardError::InvalidData(
                "row height must be finite and > 0".to_owned(),
            ));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(DashboardError::InvalidData(
                "gap must be finite and >= 0".to_owned(),
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(DashboardError::InvalidData(
                "padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.min_widget_px.is_finite() || self.min_widget_px < 1.0 {
            return Err(DashboardError::InvalidData(
                "minimum widget size must be finite and >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize dashboard config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> DashboardResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse dashboard config: {e}"))
        })
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

fn default_padding() -> f64 {
    16.0
}

fn default_min_widget_px() -> f64 {
    120.0
}

fn default_collision_iteration_limit() -> usize {
    DEFAULT_COLLISION_ITERATION_LIMIT
}
