use tracing::{debug, trace};

use crate::error::{DashboardError, DashboardResult};
use crate::interaction::{Gesture, GestureKind, InteractionMode, PointerGeometry, PointerPosition};
use crate::layout::{LayoutUnit, resolve_collisions_with_limit};
use crate::source::DataSource;

use super::{DashboardEngine, LayoutStore};

impl<S: DataSource, St: LayoutStore> DashboardEngine<S, St> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn active_gesture(&self) -> Option<&Gesture> {
        self.interaction.gesture()
    }

    pub fn begin_drag(&mut self, widget_id: &str, pointer: PointerPosition) -> DashboardResult<()> {
        self.begin_gesture(widget_id, GestureKind::Drag, pointer)
    }

    pub fn begin_resize(
        &mut self,
        widget_id: &str,
        pointer: PointerPosition,
    ) -> DashboardResult<()> {
        self.begin_gesture(widget_id, GestureKind::Resize, pointer)
    }

    /// Moves the active gesture's widget in the working layout.
    ///
    /// Returns `false` for a stray move with no gesture in progress.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> DashboardResult<bool> {
        let Some(gesture) = self.interaction.gesture() else {
            trace!("ignoring pointer move without gesture");
            return Ok(false);
        };
        let geometry = self.pointer_geometry()?;
        let rect = gesture.apply(pointer, &geometry);
        let widget_id = gesture.widget_id.clone();

        let working = self.working.get_or_insert_with(|| self.layout.clone());
        match working.widget_mut(&widget_id) {
            Some(widget) => {
                widget.set_rect(rect);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ends the gesture: resolves collisions around the moved widget, commits
    /// and persists. Returns `false` when no gesture was active.
    pub fn pointer_up(&mut self) -> bool {
        let Some(gesture) = self.interaction.finish() else {
            return false;
        };
        let working = self.working.take().unwrap_or_else(|| self.layout.clone());
        let resolved = resolve_collisions_with_limit(
            &working,
            Some(&gesture.widget_id),
            self.config.collision_iteration_limit,
        );
        debug!(widget_id = %gesture.widget_id, kind = ?gesture.kind, "committed gesture");
        self.commit(resolved);
        true
    }

    /// Drops the active gesture and reverts the working layout.
    pub fn cancel_gesture(&mut self) -> bool {
        self.working = None;
        match self.interaction.finish() {
            Some(gesture) => {
                debug!(widget_id = %gesture.widget_id, "cancelled gesture");
                true
            }
            None => false,
        }
    }

    /// Measurements for pointer math; needs a measured container.
    pub fn pointer_geometry(&self) -> DashboardResult<PointerGeometry> {
        let container = self.container.ok_or(DashboardError::InvalidContainer {
            width: 0.0,
            height: 0.0,
        })?;
        let layout = &self.layout;
        let column_width = match layout.unit {
            LayoutUnit::Grid => layout.metrics(self.config.padding).column_width(container)?,
            LayoutUnit::Px => 1.0,
        };
        Ok(PointerGeometry {
            unit: layout.unit,
            columns: layout.columns,
            column_width,
            row_height: layout.row_height,
            gap: layout.gap,
            container,
            min_widget_px: self.config.min_widget_px,
        })
    }

    fn begin_gesture(
        &mut self,
        widget_id: &str,
        kind: GestureKind,
        pointer: PointerPosition,
    ) -> DashboardResult<()> {
        self.pointer_geometry()?;
        let origin_rect = self.require_widget(widget_id)?.rect();
        self.working = Some(self.layout.clone());
        let replaced = self.interaction.begin(Gesture {
            widget_id: widget_id.to_owned(),
            kind,
            origin_pointer: pointer,
            origin_rect,
        });
        if let Some(previous) = replaced {
            debug!(widget_id = %previous.widget_id, "new gesture replaced unfinished gesture");
        }
        Ok(())
    }
}
