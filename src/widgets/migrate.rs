//! Read-time migration of legacy query fields.
//!
//! Readers call `ensure_*` every time and never write back; the stored config
//! keeps its legacy fields until the user edits the widget and
//! [`commit_migration`] runs.

use tracing::debug;

use crate::aggregate::Series;
use crate::query::{Filter, parse_legacy_query, parse_tag_shorthand, split_list};

use super::model::{ChartConfig, ChartMode, LegacyFilterFields, Widget, WidgetKind};

/// Effective filter list: stored filters, else the legacy fields, else one
/// match-all filter.
#[must_use]
pub fn ensure_filters(filters: &[Filter], legacy: &LegacyFilterFields) -> Vec<Filter> {
    if !filters.is_empty() {
        return filters.to_vec();
    }
    vec![legacy_filter(legacy).unwrap_or_default()]
}

/// Effective group-mode filter of a chart.
#[must_use]
pub fn ensure_chart_filter(config: &ChartConfig) -> Filter {
    if !config.filter.is_unconstrained() {
        return config.filter.clone();
    }
    legacy_filter(&config.legacy).unwrap_or_else(|| config.filter.clone())
}

/// Effective series of a series-mode chart; never empty.
#[must_use]
pub fn ensure_chart_series(config: &ChartConfig) -> Vec<Series> {
    if !config.series.is_empty() {
        return config.series.clone();
    }
    vec![Series::new("series-1", "", ensure_chart_filter(config))]
}

/// Writes migrated filters into the config and clears legacy fields.
///
/// Returns whether anything changed.
pub fn commit_migration(widget: &mut Widget) -> bool {
    let changed = match &mut widget.kind {
        WidgetKind::TaskList(config) => {
            commit_filters(&mut config.filters, &mut config.legacy)
        }
        WidgetKind::Stats(config) => commit_filters(&mut config.filters, &mut config.legacy),
        WidgetKind::StatusBar(config) => {
            commit_filters(&mut config.filters, &mut config.legacy)
        }
        WidgetKind::PieChart(config) | WidgetKind::LineChart(config) => commit_chart(config),
    };
    if changed {
        debug!(widget_id = %widget.id, "committed legacy filter migration");
    }
    changed
}

fn commit_filters(filters: &mut Vec<Filter>, legacy: &mut LegacyFilterFields) -> bool {
    if legacy.is_empty() {
        return false;
    }
    *filters = ensure_filters(filters, legacy);
    *legacy = LegacyFilterFields::default();
    true
}

fn commit_chart(config: &mut ChartConfig) -> bool {
    if config.legacy.is_empty() {
        return false;
    }
    match config.mode {
        ChartMode::Group => config.filter = ensure_chart_filter(config),
        ChartMode::Series => config.series = ensure_chart_series(config),
    }
    config.legacy = LegacyFilterFields::default();
    true
}

/// Query first, then tag shorthand merged into the same filter.
fn legacy_filter(legacy: &LegacyFilterFields) -> Option<Filter> {
    let mut filter = legacy
        .query
        .as_deref()
        .map(parse_legacy_query)
        .unwrap_or_default();

    if let Some(shorthand) = legacy.tag_filter.as_deref() {
        let mut tags = filter.tag_list();
        for tag in split_list(&parse_tag_shorthand(shorthand).tags) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        filter.tags = tags.join(", ");
    }

    (!filter.is_unconstrained()).then_some(filter)
}
