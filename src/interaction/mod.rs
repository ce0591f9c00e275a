//! Drag and resize gestures.
//!
//! At most one gesture is active. Pointer moves map to a candidate rectangle
//! for the working layout; the engine resolves collisions on release.

use serde::{Deserialize, Serialize};

use crate::core::{ContainerSize, Rect, cells_for_delta};
use crate::layout::LayoutUnit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    Drag,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// Pointer position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Grid and container measurements needed to turn pointer travel into geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerGeometry {
    pub unit: LayoutUnit,
    pub columns: u32,
    pub column_width: f64,
    pub row_height: f64,
    pub gap: f64,
    pub container: ContainerSize,
    pub min_widget_px: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub widget_id: String,
    pub kind: GestureKind,
    pub origin_pointer: PointerPosition,
    pub origin_rect: Rect,
}

impl Gesture {
    /// Rectangle for the widget with the pointer at `pointer`.
    #[must_use]
    pub fn apply(&self, pointer: PointerPosition, geometry: &PointerGeometry) -> Rect {
        let dx = pointer.x - self.origin_pointer.x;
        let dy = pointer.y - self.origin_pointer.y;
        match (self.kind, geometry.unit) {
            (GestureKind::Drag, LayoutUnit::Grid) => drag_grid(self.origin_rect, dx, dy, geometry),
            (GestureKind::Drag, LayoutUnit::Px) => drag_px(self.origin_rect, dx, dy, geometry),
            (GestureKind::Resize, LayoutUnit::Grid) => {
                resize_grid(self.origin_rect, dx, dy, geometry)
            }
            (GestureKind::Resize, LayoutUnit::Px) => resize_px(self.origin_rect, dx, dy, geometry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    gesture: Option<Gesture>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.gesture.as_ref().map(|gesture| gesture.kind) {
            None => InteractionMode::Idle,
            Some(GestureKind::Drag) => InteractionMode::Dragging,
            Some(GestureKind::Resize) => InteractionMode::Resizing,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.gesture.is_none()
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Starts a gesture, replacing any active one. Returns the replaced gesture.
    pub fn begin(&mut self, gesture: Gesture) -> Option<Gesture> {
        self.gesture.replace(gesture)
    }

    /// Ends the active gesture and hands it back.
    pub fn finish(&mut self) -> Option<Gesture> {
        self.gesture.take()
    }
}

fn drag_grid(origin: Rect, dx: f64, dy: f64, geometry: &PointerGeometry) -> Rect {
    let columns = f64::from(geometry.columns);
    let x = origin.x + cells_for_delta(dx, geometry.column_width, geometry.gap);
    let y = origin.y + cells_for_delta(dy, geometry.row_height, geometry.gap);
    origin.with_position(x.clamp(0.0, (columns - origin.w).max(0.0)), y.max(0.0))
}

fn drag_px(origin: Rect, dx: f64, dy: f64, geometry: &PointerGeometry) -> Rect {
    let max_x = (geometry.container.width - origin.w).max(0.0);
    origin.with_position(
        (origin.x + dx).round().clamp(0.0, max_x),
        (origin.y + dy).round().max(0.0),
    )
}

fn resize_grid(origin: Rect, dx: f64, dy: f64, geometry: &PointerGeometry) -> Rect {
    let max_w = (f64::from(geometry.columns) - origin.x).max(1.0);
    let w = origin.w + cells_for_delta(dx, geometry.column_width, geometry.gap);
    let h = origin.h + cells_for_delta(dy, geometry.row_height, geometry.gap);
    origin.with_size(w.clamp(1.0, max_w), h.max(1.0))
}

fn resize_px(origin: Rect, dx: f64, dy: f64, geometry: &PointerGeometry) -> Rect {
    let min = geometry.min_widget_px.max(1.0);
    let max_w = (geometry.container.width - origin.x).max(min);
    origin.with_size(
        (origin.w + dx).round().clamp(min, max_w),
        (origin.h + dy).round().max(min),
    )
}
