//! Layout Model: normalization, collision resolution, placement and units.

mod collision;
mod model;
mod normalize;
mod placement;
mod units;

pub use collision::{
    DEFAULT_COLLISION_ITERATION_LIMIT, has_overlaps, resolve_collisions,
    resolve_collisions_with_limit,
};
pub use model::{DEFAULT_COLUMNS, DEFAULT_GAP, DEFAULT_ROW_HEIGHT, Layout, LayoutUnit};
pub use normalize::{normalize_layout, normalize_layout_with_limit};
pub use placement::{next_free_row, place_widget};
pub use units::{convert_layout_to_grid, convert_layout_to_pixels};
