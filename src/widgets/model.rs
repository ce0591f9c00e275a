use serde::{Deserialize, Serialize};

use crate::aggregate::{
    CompareBasis, CompareDisplay, CompareMode, CountTarget, GroupField, Series, TimeField,
};
use crate::core::Rect;
use crate::core::lenient::{lenient_f64, missing_number};
use crate::query::Filter;
use crate::time::TimeRangeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleSide {
    #[default]
    Left,
    Center,
    Right,
}

/// Discriminant of [`WidgetKind`], used by the widget factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetType {
    TaskList,
    Stats,
    StatusBar,
    PieChart,
    LineChart,
}

/// A dashboard tile: geometry, display options and a typed configuration.
///
/// Geometry is read leniently; missing or malformed coordinates come back as
/// NaN and are repaired by layout normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default)]
    pub id: String,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub w: f64,
    #[serde(default = "missing_number", deserialize_with = "lenient_f64")]
    pub h: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub title_size: TitleSize,
    #[serde(default)]
    pub title_side: TitleSide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_icon: Option<String>,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

impl Widget {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: WidgetKind, rect: Rect) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            title: None,
            title_size: TitleSize::default(),
            title_side: TitleSide::default(),
            header_icon: None,
            kind,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_header_icon(mut self, icon: impl Into<String>) -> Self {
        self.header_icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        self.kind.widget_type()
    }
}

/// Widget configuration, tagged on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WidgetKind {
    TaskList(TaskListConfig),
    Stats(StatsConfig),
    StatusBar(StatusBarConfig),
    PieChart(ChartConfig),
    LineChart(ChartConfig),
}

impl WidgetKind {
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        match self {
            Self::TaskList(_) => WidgetType::TaskList,
            Self::Stats(_) => WidgetType::Stats,
            Self::StatusBar(_) => WidgetType::StatusBar,
            Self::PieChart(_) => WidgetType::PieChart,
            Self::LineChart(_) => WidgetType::LineChart,
        }
    }

    /// Fresh configuration for a widget of `widget_type`.
    #[must_use]
    pub fn for_type(widget_type: WidgetType) -> Self {
        match widget_type {
            WidgetType::TaskList => Self::TaskList(TaskListConfig::default()),
            WidgetType::Stats => Self::Stats(StatsConfig::default()),
            WidgetType::StatusBar => Self::StatusBar(StatusBarConfig::default()),
            WidgetType::PieChart => Self::PieChart(ChartConfig::default()),
            WidgetType::LineChart => Self::LineChart(ChartConfig {
                mode: ChartMode::Series,
                ..ChartConfig::default()
            }),
        }
    }
}

/// Free-text query and tag shorthand kept from older documents.
///
/// Read for migration only; cleared by `commit_migration`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LegacyFilterFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_filter: Option<String>,
}

impl LegacyFilterFields {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        is_blank(self.query.as_deref()) && is_blank(self.tag_filter.as_deref())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskListConfig {
    pub filters: Vec<Filter>,
    pub show_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(flatten)]
    pub legacy: LegacyFilterFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareConfig {
    pub mode: CompareMode,
    pub range: TimeRangeConfig,
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub display: CompareDisplay,
    pub basis: CompareBasis,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsConfig {
    pub filters: Vec<Filter>,
    pub count_target: CountTarget,
    pub time_field: TimeField,
    pub time_range: TimeRangeConfig,
    pub compare: CompareConfig,
    #[serde(flatten)]
    pub legacy: LegacyFilterFields,
}

/// Progress toward a numeric goal; no comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatusBarConfig {
    pub filters: Vec<Filter>,
    pub count_target: CountTarget,
    pub time_field: TimeField,
    pub time_range: TimeRangeConfig,
    pub target: f64,
    #[serde(flatten)]
    pub legacy: LegacyFilterFields,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            count_target: CountTarget::default(),
            time_field: TimeField::default(),
            time_range: TimeRangeConfig::default(),
            target: 100.0,
            legacy: LegacyFilterFields::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartMode {
    #[default]
    Group,
    Series,
}

/// Shared by pie and line charts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    pub mode: ChartMode,
    pub filter: Filter,
    pub group_by: GroupField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub series: Vec<Series>,
    #[serde(flatten)]
    pub legacy: LegacyFilterFields,
}
