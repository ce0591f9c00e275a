use std::collections::HashSet;

use tracing::debug;

use crate::core::Rect;
use crate::widgets::{Widget, new_widget_id};

use super::collision::{DEFAULT_COLLISION_ITERATION_LIMIT, resolve_collisions_with_limit};
use super::model::{DEFAULT_COLUMNS, DEFAULT_GAP, DEFAULT_ROW_HEIGHT, Layout, LayoutUnit};

/// Repairs a layout read from storage or produced by an edit.
///
/// Metrics out of range fall back to defaults, widget geometry is floored and
/// clamped into the grid, duplicate or blank ids are replaced, and overlaps
/// are resolved. Idempotent.
#[must_use]
pub fn normalize_layout(layout: &Layout) -> Layout {
    normalize_layout_with_limit(layout, DEFAULT_COLLISION_ITERATION_LIMIT)
}

#[must_use]
pub fn normalize_layout_with_limit(layout: &Layout, iteration_limit: usize) -> Layout {
    let mut normalized = Layout {
        columns: repair_columns(layout.columns),
        row_height: repair_row_height(layout.row_height),
        gap: repair_gap(layout.gap),
        unit: layout.unit,
        widgets: Vec::with_capacity(layout.widgets.len()),
    };

    let mut seen_ids: HashSet<String> = HashSet::with_capacity(layout.widgets.len());
    for widget in &layout.widgets {
        let mut widget = widget.clone();
        if widget.id.trim().is_empty() || seen_ids.contains(&widget.id) {
            let fresh = new_widget_id();
            debug!(old_id = %widget.id, new_id = %fresh, "replaced duplicate or blank widget id");
            widget.id = fresh;
        }
        seen_ids.insert(widget.id.clone());

        let rect = normalize_rect(&widget, &normalized);
        widget.set_rect(rect);
        normalized.widgets.push(widget);
    }

    resolve_collisions_with_limit(&normalized, None, iteration_limit)
}

fn normalize_rect(widget: &Widget, layout: &Layout) -> Rect {
    let (default_w, default_h) = default_extent(widget, layout);
    let x = finite_or(widget.x, 0.0).floor();
    let y = finite_or(widget.y, 0.0).floor();
    let w = finite_or(widget.w, default_w).floor();
    let h = finite_or(widget.h, default_h).floor();

    match layout.unit {
        LayoutUnit::Grid => {
            let columns = f64::from(layout.columns);
            let w = w.clamp(1.0, columns);
            Rect::new(x.clamp(0.0, columns - w), y.max(0.0), w, h.max(1.0))
        }
        LayoutUnit::Px => Rect::new(x.max(0.0), y.max(0.0), w.max(1.0), h.max(1.0)),
    }
}

/// Type default size in the layout's unit. Pixel sizes use the row pitch for
/// both axes since column width depends on the container.
fn default_extent(widget: &Widget, layout: &Layout) -> (f64, f64) {
    let (w, h) = widget.widget_type().default_size();
    match layout.unit {
        LayoutUnit::Grid => (w, h),
        LayoutUnit::Px => {
            let cells = |count: f64| count * layout.row_height + (count - 1.0) * layout.gap;
            (cells(w), cells(h))
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn repair_columns(columns: u32) -> u32 {
    if columns == 0 { DEFAULT_COLUMNS } else { columns }
}

fn repair_row_height(row_height: f64) -> f64 {
    if row_height.is_finite() && row_height > 0.0 {
        row_height
    } else {
        DEFAULT_ROW_HEIGHT
    }
}

fn repair_gap(gap: f64) -> f64 {
    if !gap.is_finite() {
        DEFAULT_GAP
    } else {
        gap.max(0.0)
    }
}
