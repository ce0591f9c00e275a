//! dashboard-rs: configurable note-vault dashboard engine.
//!
//! Widgets (task lists, stats, progress bars, pie and line charts) live on a
//! grid layout and are fed by declarative filters compiled into queries for an
//! external data source. The crate owns layout geometry, filter compilation,
//! time-window resolution and aggregation; rendering is left to the host.

pub mod aggregate;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod layout;
pub mod query;
pub mod source;
pub mod telemetry;
pub mod time;
pub mod widgets;

pub use api::{DashboardConfig, DashboardEngine};
pub use error::{DashboardError, DashboardResult};
