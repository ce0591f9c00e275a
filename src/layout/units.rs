use tracing::debug;

use crate::core::ContainerSize;
use crate::error::DashboardResult;

use super::model::{Layout, LayoutUnit};

/// One-time migration of a grid layout to absolute pixel coordinates.
///
/// A layout already in pixels is returned unchanged; its geometry is never
/// recomputed from the current container.
pub fn convert_layout_to_pixels(
    layout: &Layout,
    padding: f64,
    container: ContainerSize,
) -> DashboardResult<Layout> {
    if layout.unit == LayoutUnit::Px {
        return Ok(layout.clone());
    }
    let metrics = layout.metrics(padding);
    let column_width = metrics.column_width(container)?;

    let mut converted = layout.clone();
    converted.unit = LayoutUnit::Px;
    for widget in &mut converted.widgets {
        widget.set_rect(metrics.grid_to_pixels(widget.rect(), column_width));
    }
    debug!(
        widgets = converted.widgets.len(),
        column_width, "converted layout from grid to pixels"
    );
    Ok(converted)
}

/// Snaps a pixel layout back onto the grid. A grid layout is returned unchanged.
pub fn convert_layout_to_grid(
    layout: &Layout,
    padding: f64,
    container: ContainerSize,
) -> DashboardResult<Layout> {
    if layout.unit == LayoutUnit::Grid {
        return Ok(layout.clone());
    }
    let metrics = layout.metrics(padding);
    let column_width = metrics.column_width(container)?;

    let mut converted = layout.clone();
    converted.unit = LayoutUnit::Grid;
    for widget in &mut converted.widgets {
        widget.set_rect(metrics.pixels_to_grid(widget.rect(), column_width));
    }
    Ok(converted)
}
