use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::error::{DashboardError, DashboardResult};

/// Measured size of the dashboard container in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Grid geometry shared by grid↔pixel conversion and pointer math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub columns: u32,
    pub row_height: f64,
    pub gap: f64,
    pub padding: f64,
}

impl GridMetrics {
    #[must_use]
    pub fn new(columns: u32, row_height: f64, gap: f64, padding: f64) -> Self {
        Self {
            columns,
            row_height,
            gap,
            padding,
        }
    }

    /// `(width - 2*padding - (columns-1)*gap) / columns`.
    pub fn column_width(self, container: ContainerSize) -> DashboardResult<f64> {
        if !container.is_valid() || self.columns == 0 {
            return Err(DashboardError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        let columns = f64::from(self.columns);
        let available = container.width - 2.0 * self.padding - (columns - 1.0) * self.gap;
        let width = available / columns;
        if !width.is_finite() || width <= 0.0 {
            return Err(DashboardError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        Ok(width)
    }

    /// Grid cells to absolute pixels, rounded to whole pixels.
    #[must_use]
    pub fn grid_to_pixels(self, rect: Rect, column_width: f64) -> Rect {
        let column_pitch = column_width + self.gap;
        let row_pitch = self.row_height + self.gap;
        Rect::new(
            (self.padding + rect.x * column_pitch).round(),
            (self.padding + rect.y * row_pitch).round(),
            (rect.w * column_width + (rect.w - 1.0).max(0.0) * self.gap).round(),
            (rect.h * self.row_height + (rect.h - 1.0).max(0.0) * self.gap).round(),
        )
    }

    /// Absolute pixels snapped back to grid cells; sizes never drop below one cell.
    #[must_use]
    pub fn pixels_to_grid(self, rect: Rect, column_width: f64) -> Rect {
        let column_pitch = column_width + self.gap;
        let row_pitch = self.row_height + self.gap;
        let max_w = f64::from(self.columns.max(1));
        let w = ((rect.w + self.gap) / column_pitch).round().clamp(1.0, max_w);
        let x = ((rect.x - self.padding) / column_pitch)
            .round()
            .clamp(0.0, max_w - w);
        Rect::new(
            x,
            ((rect.y - self.padding) / row_pitch).round().max(0.0),
            w,
            ((rect.h + self.gap) / row_pitch).round().max(1.0),
        )
    }
}

/// Pointer travel in pixels to whole cells: `round(delta / (cell + gap))`.
#[must_use]
pub fn cells_for_delta(delta_px: f64, cell_size: f64, gap: f64) -> f64 {
    let pitch = cell_size + gap;
    if !pitch.is_finite() || pitch <= 0.0 || !delta_px.is_finite() {
        return 0.0;
    }
    (delta_px / pitch).round()
}
