use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::ContainerSize;
use crate::error::{DashboardError, DashboardResult};
use crate::interaction::InteractionState;
use crate::layout::{Layout, LayoutUnit, convert_layout_to_pixels, normalize_layout_with_limit};
use crate::source::DataSource;
use crate::widgets::Widget;

use super::{DashboardConfig, FetchRegistry, LayoutStore, NullStore, WidgetData};

/// Main orchestration facade consumed by host applications.
///
/// `DashboardEngine` owns the committed layout, the working copy used during
/// a gesture, per-widget fetch tickets and the last evaluated widget data.
pub struct DashboardEngine<S: DataSource, St: LayoutStore = NullStore> {
    pub(super) config: DashboardConfig,
    pub(super) source: S,
    pub(super) store: St,
    pub(super) layout: Layout,
    pub(super) working: Option<Layout>,
    pub(super) container: Option<ContainerSize>,
    pub(super) interaction: InteractionState,
    pub(super) fetches: FetchRegistry,
    pub(super) data: HashMap<String, WidgetData>,
}

impl<S: DataSource> DashboardEngine<S, NullStore> {
    /// Engine without persistence.
    pub fn new(source: S, config: DashboardConfig) -> DashboardResult<Self> {
        Self::with_store(source, NullStore, config)
    }
}

impl<S: DataSource, St: LayoutStore> DashboardEngine<S, St> {
    /// Creates an engine holding the default dashboard.
    pub fn with_store(source: S, store: St, config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        let layout =
            normalize_layout_with_limit(&config.default_layout(), config.collision_iteration_limit);
        Ok(Self {
            config,
            source,
            store,
            layout,
            working: None,
            container: None,
            interaction: InteractionState::default(),
            fetches: FetchRegistry::new(),
            data: HashMap::new(),
        })
    }

    /// Replaces the layout with persisted state, normalized. Not saved back.
    pub fn load_layout(&mut self, layout: &Layout) -> DashboardResult<()> {
        let mut normalized = normalize_layout_with_limit(layout, self.config.collision_iteration_limit);
        if let Some(container) = self.container {
            normalized = self.migrate_units(normalized, container)?;
        }
        self.cancel_gesture();
        self.fetches.cancel_all();
        self.data.clear();
        debug!(widgets = normalized.widgets.len(), unit = ?normalized.unit, "loaded layout");
        self.layout = normalized;
        Ok(())
    }

    /// Reads a persisted document (v1 contract or bare layout) and loads it.
    pub fn load_layout_json(&mut self, input: &str) -> DashboardResult<()> {
        let layout = Layout::from_json_compat_str(input)?;
        self.load_layout(&layout)
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Last committed layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Layout as currently displayed: the working copy during a gesture.
    #[must_use]
    pub fn working_layout(&self) -> &Layout {
        self.working.as_ref().unwrap_or(&self.layout)
    }

    #[must_use]
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.layout.widget(id)
    }

    #[must_use]
    pub fn container(&self) -> Option<ContainerSize> {
        self.container
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn store(&self) -> &St {
        &self.store
    }

    #[must_use]
    pub fn into_parts(self) -> (S, St) {
        (self.source, self.store)
    }

    /// Records the measured container size.
    ///
    /// The first measurement migrates a grid layout to pixels when the
    /// configured canvas unit is `px`; later measurements never recompute
    /// pixel geometry.
    pub fn set_container(&mut self, container: ContainerSize) -> DashboardResult<()> {
        if !container.is_valid() {
            return Err(DashboardError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        self.container = Some(container);
        if self.needs_unit_migration() {
            let migrated = self.migrate_units(self.layout.clone(), container)?;
            self.commit(migrated);
        }
        Ok(())
    }

    pub(super) fn require_widget(&self, id: &str) -> DashboardResult<&Widget> {
        self.layout
            .widget(id)
            .ok_or_else(|| DashboardError::UnknownWidget(id.to_owned()))
    }

    /// Makes `layout` the committed layout and persists it.
    pub(super) fn commit(&mut self, layout: Layout) {
        self.layout = layout;
        self.working = None;
        if let Err(err) = self.store.save(&self.layout) {
            warn!(error = %err, "failed to persist layout; keeping in-memory state");
        }
    }

    fn needs_unit_migration(&self) -> bool {
        self.config.canvas_unit == LayoutUnit::Px && self.layout.unit == LayoutUnit::Grid
    }

    fn migrate_units(&self, layout: Layout, container: ContainerSize) -> DashboardResult<Layout> {
        if self.config.canvas_unit == LayoutUnit::Px && layout.unit == LayoutUnit::Grid {
            return convert_layout_to_pixels(&layout, self.config.padding, container);
        }
        Ok(layout)
    }
}
