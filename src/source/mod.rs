//! Data source contract consumed by the aggregation engine.

mod checkbox;
mod expr;
mod memory;
mod null_source;
mod types;

pub use checkbox::{is_checked_line, toggle_checkbox_line};
pub use memory::MemorySource;
pub use null_source::NullSource;
pub use types::{Page, Task, file_stem};

use crate::error::DashboardResult;

/// Contract implemented by any query provider.
///
/// Providers receive the folder/tag query produced by the filter compiler.
/// An empty query selects everything. Errors are reported, not panicked;
/// the aggregation layer turns them into empty results.
pub trait DataSource {
    /// `false` while the provider is missing or still indexing.
    fn is_ready(&self) -> bool {
        true
    }

    fn query_tasks(&self, query: &str) -> DashboardResult<Vec<Task>>;

    fn query_pages(&self, query: &str) -> DashboardResult<Vec<Page>>;

    /// Flips the checkbox on `line` (zero-based) of `path`.
    ///
    /// Returns `false` when the file, line, or checkbox pattern does not match.
    fn toggle_task(&mut self, path: &str, line: u32) -> bool;
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn query_tasks(&self, query: &str) -> DashboardResult<Vec<Task>> {
        (**self).query_tasks(query)
    }

    fn query_pages(&self, query: &str) -> DashboardResult<Vec<Page>> {
        (**self).query_pages(query)
    }

    fn toggle_task(&mut self, path: &str, line: u32) -> bool {
        (**self).toggle_task(path, line)
    }
}
