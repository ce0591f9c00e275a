use std::collections::HashSet;
use std::slice;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::query::{CompiledFilter, Filter, compile_filter};
use crate::source::{DataSource, Page, Task};
use crate::time::{ResolvedRange, TimePreset, resolve_time_range};

use super::grouping::NamedValue;
use super::series::Series;
use super::window::{TimeField, in_window, page_timestamp, task_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountTarget {
    #[default]
    #[serde(alias = "pages")]
    Files,
    Tasks,
}

/// Count plus the day span of the window it was taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountResult {
    pub count: usize,
    pub days: Option<i64>,
}

/// Runs compiled filters against a data source.
///
/// Every engine call is isolated: a failing or unready provider contributes an
/// empty result for that call and the remaining filters still run.
pub struct QueryRunner<'a, S: DataSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: DataSource + ?Sized> QueryRunner<'a, S> {
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Union of pages matched by any filter, deduplicated by path.
    #[must_use]
    pub fn pages(&self, filters: &[Filter]) -> Vec<Page> {
        let mut merged: IndexMap<String, Page> = IndexMap::new();
        for compiled in compile_all(filters) {
            for page in self.matching_pages(&compiled) {
                merged.entry(page.path.clone()).or_insert(page);
            }
        }
        trace!(count = merged.len(), "merged pages");
        merged.into_values().collect()
    }

    /// Union of tasks matched by any filter, deduplicated by path and line.
    ///
    /// YAML clauses are checked against the frontmatter of the task's page.
    #[must_use]
    pub fn tasks(&self, filters: &[Filter]) -> Vec<Task> {
        let mut merged: IndexMap<(String, u32), Task> = IndexMap::new();
        for compiled in compile_all(filters) {
            let mut tasks = self.fetch_tasks(&compiled.source);
            if !compiled.yaml.is_empty() {
                let allowed: HashSet<String> = self
                    .matching_pages(&compiled)
                    .into_iter()
                    .map(|page| page.path)
                    .collect();
                tasks.retain(|task| allowed.contains(&task.path));
            }
            for task in tasks {
                merged
                    .entry((task.path.clone(), task.line))
                    .or_insert(task);
            }
        }
        trace!(count = merged.len(), "merged tasks");
        merged.into_values().collect()
    }

    /// Counts deduplicated files or tasks whose timestamp falls in `range`.
    #[must_use]
    pub fn count_by_target(
        &self,
        target: CountTarget,
        filters: &[Filter],
        time_field: TimeField,
        range: &ResolvedRange,
    ) -> CountResult {
        let count = match target {
            CountTarget::Files => self
                .pages(filters)
                .iter()
                .filter(|page| in_window(page_timestamp(page, time_field), range))
                .count(),
            CountTarget::Tasks => self
                .tasks(filters)
                .iter()
                .filter(|task| in_window(task_timestamp(task, time_field), range))
                .count(),
        };
        debug!(?target, count, days = ?range.days, "count by target");
        CountResult {
            count,
            days: range.days,
        }
    }

    /// One value per series, in series order.
    #[must_use]
    pub fn build_series_counts(
        &self,
        series: &[Series],
        presets: &[TimePreset],
        now: NaiveDateTime,
    ) -> Vec<NamedValue> {
        series
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let range = resolve_time_range(&entry.time_range, presets, now);
                let result = self.count_by_target(
                    entry.count_mode.into(),
                    slice::from_ref(&entry.filter),
                    entry.time_field,
                    &range,
                );
                NamedValue::new(entry.display_label(index), result.count as f64)
            })
            .collect()
    }

    fn matching_pages(&self, compiled: &CompiledFilter) -> Vec<Page> {
        let mut pages = self.fetch_pages(&compiled.source);
        pages.retain(|page| compiled.yaml.matches(page.frontmatter.as_ref()));
        pages
    }

    fn fetch_pages(&self, query: &str) -> Vec<Page> {
        if !self.source.is_ready() {
            debug!(query, "data source not ready; no pages");
            return Vec::new();
        }
        match self.source.query_pages(query) {
            Ok(pages) => pages,
            Err(err) => {
                warn!(error = %err, query, "page query failed; treating as empty");
                Vec::new()
            }
        }
    }

    fn fetch_tasks(&self, query: &str) -> Vec<Task> {
        if !self.source.is_ready() {
            debug!(query, "data source not ready; no tasks");
            return Vec::new();
        }
        match self.source.query_tasks(query) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, query, "task query failed; treating as empty");
                Vec::new()
            }
        }
    }
}

/// No filters means one unconstrained filter.
fn compile_all(filters: &[Filter]) -> Vec<CompiledFilter> {
    if filters.is_empty() {
        return vec![compile_filter(&Filter::default())];
    }
    filters.iter().map(compile_filter).collect()
}
