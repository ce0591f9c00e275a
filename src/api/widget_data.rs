use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{
    CompareBasis, CompareMode, ComparisonOutcome, CountResult, NamedValue, QueryRunner, apply_comparison_basis,
    group_pages,
};
use crate::query::Filter;
use crate::source::{DataSource, Task};
use crate::time::{
    ResolvedRange, TimePreset, derive_previous_range, preset_label, range_has_bounds,
    resolve_time_range,
};
use crate::widgets::{
    ChartConfig, ChartMode, LegacyFilterFields, StatsConfig, StatusBarConfig, TaskListConfig,
    Widget, WidgetKind, ensure_chart_filter, ensure_chart_series, ensure_filters,
};

/// Display-ready result of evaluating one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WidgetData {
    TaskList(TaskListData),
    Stat(StatData),
    Progress(ProgressData),
    Chart(ChartData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListData {
    pub tasks: Vec<Task>,
    /// Matches before `limit` was applied.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatData {
    pub value: usize,
    pub days: Option<i64>,
    pub comparison: ComparisonData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ComparisonData {
    Disabled,
    Available(ComparisonOutcome),
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub value: usize,
    pub target: f64,
    /// `value / target` clamped to `[0, 1]`; 0 for a non-positive target.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub mode: ChartMode,
    pub values: Vec<NamedValue>,
}

/// Evaluates `widget` against `source`. Never fails: provider errors have
/// already degraded to empty results inside the query runner.
#[must_use]
pub fn evaluate_widget<S: DataSource + ?Sized>(
    widget: &Widget,
    source: &S,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> WidgetData {
    let runner = QueryRunner::new(source);
    let data = match &widget.kind {
        WidgetKind::TaskList(config) => WidgetData::TaskList(evaluate_task_list(&runner, config)),
        WidgetKind::Stats(config) => WidgetData::Stat(evaluate_stats(&runner, config, presets, now)),
        WidgetKind::StatusBar(config) => {
            WidgetData::Progress(evaluate_status_bar(&runner, config, presets, now))
        }
        WidgetKind::PieChart(config) | WidgetKind::LineChart(config) => {
            WidgetData::Chart(evaluate_chart(&runner, config, presets, now))
        }
    };
    debug!(widget_id = %widget.id, widget_type = ?widget.widget_type(), "evaluated widget");
    data
}

fn evaluate_task_list<S: DataSource + ?Sized>(
    runner: &QueryRunner<'_, S>,
    config: &TaskListConfig,
) -> TaskListData {
    let filters = ensure_filters(&config.filters, &config.legacy);
    let mut tasks = runner.tasks(&filters);
    if !config.show_completed {
        tasks.retain(|task| !task.completed);
    }
    let total = tasks.len();
    if let Some(limit) = config.limit.filter(|limit| *limit > 0) {
        tasks.truncate(limit);
    }
    TaskListData { tasks, total }
}

fn evaluate_stats<S: DataSource + ?Sized>(
    runner: &QueryRunner<'_, S>,
    config: &StatsConfig,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> StatData {
    let filters = ensure_filters(&config.filters, &config.legacy);
    let range = resolve_time_range(&config.time_range, presets, now);
    let primary = runner.count_by_target(config.count_target, &filters, config.time_field, &range);
    let comparison = compare_stats(runner, config, &filters, &range, primary, presets, now);
    StatData {
        value: primary.count,
        days: primary.days,
        comparison,
    }
}

fn unavailable(reason: &str) -> ComparisonData {
    ComparisonData::Unavailable {
        reason: reason.to_owned(),
    }
}

fn compare_stats<S: DataSource + ?Sized>(
    runner: &QueryRunner<'_, S>,
    config: &StatsConfig,
    filters: &[Filter],
    range: &ResolvedRange,
    primary: CountResult,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> ComparisonData {
    let compare = &config.compare;
    if compare.mode == CompareMode::None {
        return ComparisonData::Disabled;
    }
    if !range_has_bounds(range) {
        if compare.mode == CompareMode::PreviousPeriod {
            return unavailable("previous period is undefined on an unbounded time range");
        }
        if compare.basis == CompareBasis::PerDay {
            return unavailable("per-day basis is undefined on an unbounded time range");
        }
    }

    let (baseline, default_label) = match compare.mode {
        CompareMode::None => return ComparisonData::Disabled,
        CompareMode::PreviousPeriod => {
            let Some(previous) = derive_previous_range(range) else {
                return unavailable("previous period is undefined on an unbounded time range");
            };
            let count =
                runner.count_by_target(config.count_target, filters, config.time_field, &previous);
            (count, "vs previous period".to_owned())
        }
        CompareMode::FixedPeriod => {
            let fixed = resolve_time_range(&compare.range, presets, now);
            let count =
                runner.count_by_target(config.count_target, filters, config.time_field, &fixed);
            (count, format!("vs {}", preset_label(&compare.range.preset, presets)))
        }
        CompareMode::Filter => {
            let compare_filters = ensure_filters(&compare.filters, &LegacyFilterFields::default());
            let count = runner.count_by_target(
                config.count_target,
                &compare_filters,
                config.time_field,
                range,
            );
            (count, "vs filter".to_owned())
        }
    };

    let normalized = apply_comparison_basis(&primary, compare.basis).and_then(|value| {
        apply_comparison_basis(&baseline, compare.basis).map(|baseline_value| (value, baseline_value))
    });
    match normalized {
        Ok((value, baseline_value)) => {
            let label = compare
                .label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .map_or(default_label, str::to_owned);
            ComparisonData::Available(ComparisonOutcome::new(
                label,
                value,
                baseline_value,
                compare.display,
            ))
        }
        Err(err) => ComparisonData::Unavailable {
            reason: err.to_string(),
        },
    }
}

fn evaluate_status_bar<S: DataSource + ?Sized>(
    runner: &QueryRunner<'_, S>,
    config: &StatusBarConfig,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> ProgressData {
    let filters = ensure_filters(&config.filters, &config.legacy);
    let range = resolve_time_range(&config.time_range, presets, now);
    let result = runner.count_by_target(config.count_target, &filters, config.time_field, &range);
    let ratio = if config.target.is_finite() && config.target > 0.0 {
        (result.count as f64 / config.target).clamp(0.0, 1.0)
    } else {
        0.0
    };
    ProgressData {
        value: result.count,
        target: config.target,
        ratio,
    }
}

fn evaluate_chart<S: DataSource + ?Sized>(
    runner: &QueryRunner<'_, S>,
    config: &ChartConfig,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> ChartData {
    let values = match config.mode {
        ChartMode::Group => {
            let filter = ensure_chart_filter(config);
            let pages = runner.pages(std::slice::from_ref(&filter));
            group_pages(&pages, &config.group_by, config.limit)
        }
        ChartMode::Series => runner.build_series_counts(&ensure_chart_series(config), presets, now),
    };
    ChartData {
        mode: config.mode,
        values,
    }
}
