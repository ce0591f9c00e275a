use uuid::Uuid;

use crate::aggregate::{CountTarget, GroupField};
use crate::core::Rect;
use crate::query::Filter;

use super::model::{ChartConfig, StatsConfig, TaskListConfig, Widget, WidgetKind, WidgetType};

impl WidgetType {
    /// Default size in grid cells as `(w, h)`.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::TaskList => (4.0, 4.0),
            Self::Stats => (3.0, 2.0),
            Self::StatusBar => (4.0, 1.0),
            Self::PieChart => (4.0, 4.0),
            Self::LineChart => (6.0, 4.0),
        }
    }

    #[must_use]
    pub fn default_title(self) -> &'static str {
        match self {
            Self::TaskList => "Tasks",
            Self::Stats => "Stats",
            Self::StatusBar => "Progress",
            Self::PieChart => "Breakdown",
            Self::LineChart => "Trend",
        }
    }
}

/// Fresh, never-reused widget id.
#[must_use]
pub fn new_widget_id() -> String {
    Uuid::new_v4().to_string()
}

/// New widget of `widget_type` at the origin with its default grid size.
#[must_use]
pub fn create_widget(widget_type: WidgetType) -> Widget {
    let (w, h) = widget_type.default_size();
    Widget::new(
        new_widget_id(),
        WidgetKind::for_type(widget_type),
        Rect::new(0.0, 0.0, w, h),
    )
    .with_title(widget_type.default_title())
}

/// Widgets of a fresh dashboard, in grid units on a 12-column grid.
#[must_use]
pub fn default_widgets() -> Vec<Widget> {
    let notes = Widget::new(
        new_widget_id(),
        WidgetKind::Stats(StatsConfig::default()),
        Rect::new(0.0, 0.0, 3.0, 2.0),
    )
    .with_title("Notes");

    let open_tasks = Widget::new(
        new_widget_id(),
        WidgetKind::Stats(StatsConfig {
            count_target: CountTarget::Tasks,
            ..StatsConfig::default()
        }),
        Rect::new(3.0, 0.0, 3.0, 2.0),
    )
    .with_title("Tasks");

    let tasks = Widget::new(
        new_widget_id(),
        WidgetKind::TaskList(TaskListConfig {
            filters: vec![Filter::default()],
            limit: Some(20),
            ..TaskListConfig::default()
        }),
        Rect::new(0.0, 2.0, 6.0, 4.0),
    )
    .with_title("Open tasks");

    let tags = Widget::new(
        new_widget_id(),
        WidgetKind::PieChart(ChartConfig {
            group_by: GroupField::Tag,
            limit: Some(8),
            ..ChartConfig::default()
        }),
        Rect::new(6.0, 0.0, 6.0, 6.0),
    )
    .with_title("Tags");

    vec![notes, open_tasks, tasks, tags]
}
