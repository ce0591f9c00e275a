use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Side,
    Bottom,
}

/// Legend beside the chart when the widget is wider than tall, else below.
#[must_use]
pub fn resolve_legend_position(width: f64, height: f64) -> LegendPosition {
    if width > height {
        LegendPosition::Side
    } else {
        LegendPosition::Bottom
    }
}
