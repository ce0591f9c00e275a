use tracing::debug;

use crate::core::Rect;
use crate::error::{DashboardError, DashboardResult};
use crate::layout::{
    LayoutUnit, convert_layout_to_pixels, normalize_layout_with_limit, place_widget,
};
use crate::source::DataSource;
use crate::widgets::{Widget, WidgetType, commit_migration, create_widget};

use super::{DashboardEngine, LayoutStore};

impl<S: DataSource, St: LayoutStore> DashboardEngine<S, St> {
    /// Adds a widget of `widget_type` at the next free row. Returns its id.
    pub fn add_widget(&mut self, widget_type: WidgetType) -> DashboardResult<String> {
        let mut widget = create_widget(widget_type);
        if self.layout.unit == LayoutUnit::Px {
            widget.set_rect(self.default_pixel_rect(widget.rect())?);
        }
        self.insert_widget(widget)
    }

    /// Adds a fully configured widget at the next free row. A blank or taken
    /// id is replaced. Returns the id the widget ended up with.
    pub fn insert_widget(&mut self, widget: Widget) -> DashboardResult<String> {
        self.cancel_gesture();
        let limit = self.config.collision_iteration_limit;
        let placed = place_widget(&self.layout, widget, limit);
        let normalized = normalize_layout_with_limit(&placed, limit);
        let id = normalized
            .widgets
            .last()
            .map(|widget| widget.id.clone())
            .unwrap_or_default();
        debug!(widget_id = %id, "added widget");
        self.commit(normalized);
        Ok(id)
    }

    /// Removes a widget and cancels its pending fetch.
    pub fn remove_widget(&mut self, id: &str) -> DashboardResult<Widget> {
        let Some(index) = self.layout.widgets.iter().position(|widget| widget.id == id) else {
            return Err(DashboardError::UnknownWidget(id.to_owned()));
        };
        self.cancel_gesture();
        self.fetches.cancel(id);
        self.data.remove(id);

        let mut layout = self.layout.clone();
        let removed = layout.widgets.remove(index);
        debug!(widget_id = %id, "removed widget");
        self.commit(layout);
        Ok(removed)
    }

    /// Edits a widget's configuration.
    ///
    /// Legacy query fields are migrated before `edit` runs, so an explicit
    /// edit is also the moment legacy fields are dropped. The id cannot be
    /// changed.
    pub fn update_widget(
        &mut self,
        id: &str,
        edit: impl FnOnce(&mut Widget),
    ) -> DashboardResult<()> {
        self.require_widget(id)?;
        self.cancel_gesture();
        self.fetches.cancel(id);
        self.data.remove(id);

        let mut layout = self.layout.clone();
        if let Some(widget) = layout.widget_mut(id) {
            commit_migration(widget);
            edit(widget);
            widget.id = id.to_owned();
        }
        let limit = self.config.collision_iteration_limit;
        let normalized = normalize_layout_with_limit(&layout, limit);
        self.commit(normalized);
        Ok(())
    }

    /// Replaces the dashboard with the default widget set.
    pub fn reset_layout(&mut self) -> DashboardResult<()> {
        self.cancel_gesture();
        self.fetches.cancel_all();
        self.data.clear();

        let limit = self.config.collision_iteration_limit;
        let mut layout = normalize_layout_with_limit(&self.config.default_layout(), limit);
        if self.config.canvas_unit == LayoutUnit::Px {
            if let Some(container) = self.container {
                layout = convert_layout_to_pixels(&layout, self.config.padding, container)?;
            }
        }
        debug!(widgets = layout.widgets.len(), "reset layout to defaults");
        self.commit(layout);
        Ok(())
    }

    /// Grid-cell size to pixels for a pixel layout. Without a measured
    /// container the row pitch stands in for the column width.
    fn default_pixel_rect(&self, cells: Rect) -> DashboardResult<Rect> {
        let metrics = self.layout.metrics(self.config.padding);
        let column_width = match self.container {
            Some(container) => metrics.column_width(container)?,
            None => self.layout.row_height,
        };
        let pixels = metrics.grid_to_pixels(cells, column_width);
        Ok(Rect::new(0.0, 0.0, pixels.w, pixels.h))
    }
}
