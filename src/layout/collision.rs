use std::cmp::Ordering;

use tracing::{trace, warn};

use crate::core::Rect;

use super::model::Layout;

pub const DEFAULT_COLLISION_ITERATION_LIMIT: usize = 1_000;

/// Repacks widgets so no two rectangles overlap.
///
/// The widget named by `moved_id` keeps its position; the others are placed
/// in `(y, x)` order and pushed down past whatever they collide with. Widget
/// order in the vector is preserved.
#[must_use]
pub fn resolve_collisions(layout: &Layout, moved_id: Option<&str>) -> Layout {
    resolve_collisions_with_limit(layout, moved_id, DEFAULT_COLLISION_ITERATION_LIMIT)
}

/// [`resolve_collisions`] with an explicit per-widget push bound.
///
/// A widget that hits the bound stays at its last position.
#[must_use]
pub fn resolve_collisions_with_limit(
    layout: &Layout,
    moved_id: Option<&str>,
    iteration_limit: usize,
) -> Layout {
    let mut resolved = layout.clone();
    let moved_index =
        moved_id.and_then(|id| resolved.widgets.iter().position(|widget| widget.id == id));

    let mut order: Vec<usize> = (0..resolved.widgets.len())
        .filter(|index| Some(*index) != moved_index)
        .collect();
    order.sort_by(|&a, &b| placement_order(resolved.widgets[a].rect(), resolved.widgets[b].rect()));

    let mut placed: Vec<Rect> = Vec::with_capacity(resolved.widgets.len());
    if let Some(index) = moved_index {
        placed.push(resolved.widgets[index].rect());
    }

    for index in order {
        let mut rect = resolved.widgets[index].rect();
        let mut iterations = 0;
        while let Some(bottom) = lowest_blocker_bottom(&placed, rect) {
            if iterations >= iteration_limit {
                warn!(
                    widget_id = %resolved.widgets[index].id,
                    iteration_limit,
                    "collision resolution gave up; widget left in place"
                );
                break;
            }
            rect.y = bottom;
            iterations += 1;
        }
        if iterations > 0 {
            trace!(widget_id = %resolved.widgets[index].id, y = rect.y, "pushed widget down");
        }
        resolved.widgets[index].set_rect(rect);
        placed.push(rect);
    }

    resolved
}

/// True when any two widgets overlap.
#[must_use]
pub fn has_overlaps(layout: &Layout) -> bool {
    let rects: Vec<Rect> = layout.widgets.iter().map(|widget| widget.rect()).collect();
    rects
        .iter()
        .enumerate()
        .any(|(i, a)| rects[i + 1..].iter().any(|b| a.overlaps(*b)))
}

fn placement_order(a: Rect, b: Rect) -> Ordering {
    a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
}

fn lowest_blocker_bottom(placed: &[Rect], rect: Rect) -> Option<f64> {
    placed
        .iter()
        .filter(|other| other.overlaps(rect))
        .map(|other| other.bottom())
        .reduce(f64::max)
}
