use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::DashboardResult;

use super::checkbox::{is_checked_line, toggle_checkbox_line};
use super::expr::SourceExpr;
use super::{DataSource, Page, Task};

/// In-memory provider for headless hosts and tests.
///
/// Evaluates the folder/tag query subset. Tasks inherit the tags of the page
/// stored at the same path. Raw file contents, when registered, back
/// `toggle_task`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Page>,
    tasks: Vec<Task>,
    files: IndexMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new(pages: Vec<Page>, tasks: Vec<Task>) -> Self {
        Self {
            pages,
            tasks,
            files: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn push_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    fn page_tags(&self, path: &str) -> &[String] {
        self.pages
            .iter()
            .find(|page| page.path == path)
            .map_or(&[], |page| page.tags.as_slice())
    }
}

impl DataSource for MemorySource {
    fn query_pages(&self, query: &str) -> DashboardResult<Vec<Page>> {
        let expr = SourceExpr::parse(query)?;
        let pages: Vec<Page> = self
            .pages
            .iter()
            .filter(|page| expr.matches(&page.tags, &page.path))
            .cloned()
            .collect();
        trace!(query, count = pages.len(), "memory source pages");
        Ok(pages)
    }

    fn query_tasks(&self, query: &str) -> DashboardResult<Vec<Task>> {
        let expr = SourceExpr::parse(query)?;
        let tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| {
                let mut tags = self.page_tags(&task.path).to_vec();
                tags.extend(task.tags.iter().cloned());
                expr.matches(&tags, &task.path)
            })
            .cloned()
            .collect();
        trace!(query, count = tasks.len(), "memory source tasks");
        Ok(tasks)
    }

    fn toggle_task(&mut self, path: &str, line: u32) -> bool {
        let Some(content) = self.files.get_mut(path) else {
            debug!(path, line, "toggle skipped: file not found");
            return false;
        };

        let mut lines: Vec<String> = content.split('\n').map(str::to_owned).collect();
        let Some(target) = usize::try_from(line).ok().and_then(|index| lines.get_mut(index)) else {
            debug!(path, line, "toggle skipped: line out of range");
            return false;
        };
        let Some(toggled) = toggle_checkbox_line(target) else {
            debug!(path, line, "toggle skipped: no checkbox on line");
            return false;
        };

        let completed = is_checked_line(&toggled).unwrap_or(false);
        *target = toggled;
        *content = lines.join("\n");

        if let Some(task) = self
            .tasks
            .iter_mut()
            .find(|task| task.path == path && task.line == line)
        {
            task.completed = completed;
        }
        true
    }
}
