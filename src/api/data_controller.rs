use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::DashboardResult;
use crate::source::DataSource;

use super::{DashboardEngine, FetchTicket, LayoutStore, WidgetData, evaluate_widget};

impl<S: DataSource, St: LayoutStore> DashboardEngine<S, St> {
    /// Evaluates a widget synchronously against the data source and caches
    /// the result.
    pub fn evaluate_widget(&mut self, id: &str, now: NaiveDateTime) -> DashboardResult<WidgetData> {
        let widget = self.require_widget(id)?;
        let data = evaluate_widget(widget, &self.source, &self.config.time_presets, now);
        self.data.insert(id.to_owned(), data.clone());
        Ok(data)
    }

    /// Evaluates every widget in layout order.
    pub fn evaluate_all(&mut self, now: NaiveDateTime) -> Vec<(String, WidgetData)> {
        let results: Vec<(String, WidgetData)> = self
            .layout
            .widgets
            .iter()
            .map(|widget| {
                (
                    widget.id.clone(),
                    evaluate_widget(widget, &self.source, &self.config.time_presets, now),
                )
            })
            .collect();
        for (id, data) in &results {
            self.data.insert(id.clone(), data.clone());
        }
        results
    }

    /// Starts an asynchronous fetch for a widget, superseding any in flight.
    pub fn begin_fetch(&mut self, id: &str) -> DashboardResult<FetchTicket> {
        self.require_widget(id)?;
        Ok(self.fetches.begin(id))
    }

    /// Stores the result of a fetch if its ticket is still current.
    ///
    /// Results for superseded tickets or removed widgets are dropped.
    pub fn apply_fetch_result(&mut self, ticket: &FetchTicket, data: WidgetData) -> bool {
        self.fetches.complete(ticket);
        if !self.layout.contains_widget(ticket.widget_id()) {
            debug!(widget_id = ticket.widget_id(), "dropping result for removed widget");
            return false;
        }
        let cache = &mut self.data;
        ticket.commit(data, |data| {
            cache.insert(ticket.widget_id().to_owned(), data);
        })
    }

    #[must_use]
    pub fn is_fetch_pending(&self, id: &str) -> bool {
        self.fetches.is_pending(id)
    }

    /// Last evaluated or fetched data for a widget.
    #[must_use]
    pub fn widget_data(&self, id: &str) -> Option<&WidgetData> {
        self.data.get(id)
    }

    /// Flips a task checkbox in the source. Cached data is invalidated on
    /// success since any widget may list or count the task.
    pub fn toggle_task(&mut self, path: &str, line: u32) -> bool {
        let toggled = self.source.toggle_task(path, line);
        if toggled {
            debug!(path, line, "toggled task");
            self.data.clear();
        } else {
            debug!(path, line, "task toggle did not match");
        }
        toggled
    }

    /// Cancels all in-flight fetches; called when the dashboard closes.
    pub fn teardown(&mut self) {
        self.cancel_gesture();
        self.fetches.cancel_all();
    }
}
