use crate::error::DashboardResult;

use super::{DataSource, Page, Task};

/// Stand-in used when no query provider is installed.
///
/// Never ready, always empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSource;

impl DataSource for NullSource {
    fn is_ready(&self) -> bool {
        false
    }

    fn query_tasks(&self, _query: &str) -> DashboardResult<Vec<Task>> {
        Ok(Vec::new())
    }

    fn query_pages(&self, _query: &str) -> DashboardResult<Vec<Page>> {
        Ok(Vec::new())
    }

    fn toggle_task(&mut self, _path: &str, _line: u32) -> bool {
        false
    }
}
