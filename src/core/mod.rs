pub mod grid;
pub(crate) mod lenient;
pub mod rect;

pub use grid::{ContainerSize, GridMetrics, cells_for_delta};
pub use rect::Rect;
