use crate::widgets::Widget;

use super::collision::resolve_collisions_with_limit;
use super::model::Layout;

/// First row below every widget (`max(y + h)`), or 0 for an empty layout.
#[must_use]
pub fn next_free_row(layout: &Layout) -> f64 {
    layout
        .widgets
        .iter()
        .map(|widget| widget.rect().bottom())
        .filter(|bottom| bottom.is_finite())
        .fold(0.0, f64::max)
}

/// Appends `widget` at the left edge of the next free row and repacks.
#[must_use]
pub fn place_widget(layout: &Layout, mut widget: Widget, iteration_limit: usize) -> Layout {
    widget.x = 0.0;
    widget.y = next_free_row(layout);
    let id = widget.id.clone();
    let mut placed = layout.clone();
    placed.widgets.push(widget);
    resolve_collisions_with_limit(&placed, Some(&id), iteration_limit)
}
