//! Widget Configuration Model.

mod defaults;
mod display;
mod migrate;
mod model;

pub use defaults::{create_widget, default_widgets, new_widget_id};
pub use display::{LegendPosition, resolve_legend_position};
pub use migrate::{commit_migration, ensure_chart_filter, ensure_chart_series, ensure_filters};
pub use model::{
    ChartConfig, ChartMode, CompareConfig, LegacyFilterFields, StatsConfig, StatusBarConfig,
    TaskListConfig, TitleSide, TitleSize, Widget, WidgetKind, WidgetType,
};
