use crate::error::DashboardResult;
use crate::layout::Layout;

/// Persistence hook for committed layouts.
///
/// Saves are fire-and-forget from the engine's point of view: a failure is
/// logged and the in-memory layout stays authoritative.
pub trait LayoutStore {
    fn save(&mut self, layout: &Layout) -> DashboardResult<()>;
}

impl<T: LayoutStore + ?Sized> LayoutStore for Box<T> {
    fn save(&mut self, layout: &Layout) -> DashboardResult<()> {
        (**self).save(layout)
    }
}

/// Store that discards every layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStore;

impl LayoutStore for NullStore {
    fn save(&mut self, _layout: &Layout) -> DashboardResult<()> {
        Ok(())
    }
}

/// Store that keeps every saved layout, newest last.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved: Vec<Layout>,
}

impl MemoryStore {
    #[must_use]
    pub fn saved(&self) -> &[Layout] {
        &self.saved
    }

    #[must_use]
    pub fn last_saved(&self) -> Option<&Layout> {
        self.saved.last()
    }

    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saved.len()
    }
}

impl LayoutStore for MemoryStore {
    fn save(&mut self, layout: &Layout) -> DashboardResult<()> {
        self.saved.push(layout.clone());
        Ok(())
    }
}
