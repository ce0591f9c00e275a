mod support;

use dashboard_rs::api::{DashboardConfig, DashboardEngine, LayoutStore, MemoryStore, WidgetData};
use dashboard_rs::core::{ContainerSize, Rect};
use dashboard_rs::error::{DashboardError, DashboardResult};
use dashboard_rs::layout::{Layout, LayoutUnit, has_overlaps};
use dashboard_rs::query::Filter;
use dashboard_rs::source::NullSource;
use dashboard_rs::widgets::{TaskListConfig, Widget, WidgetKind, WidgetType};

use support::{now, sample_vault};

const CONTAINER: ContainerSize = ContainerSize {
    width: 1_168.0,
    height: 800.0,
};

#[derive(Debug, Default)]
struct FailingStore {
    attempts: usize,
}

impl LayoutStore for FailingStore {
    fn save(&mut self, _layout: &Layout) -> DashboardResult<()> {
        self.attempts += 1;
        Err(DashboardError::InvalidData("disk full".to_owned()))
    }
}

fn engine() -> DashboardEngine<dashboard_rs::source::MemorySource, MemoryStore> {
    DashboardEngine::with_store(sample_vault(), MemoryStore::default(), DashboardConfig::default())
        .expect("valid config")
}

#[test]
fn new_engine_holds_the_default_dashboard() {
    let engine = DashboardEngine::new(NullSource, DashboardConfig::default()).expect("engine");
    let layout = engine.layout();
    assert_eq!(layout.columns, 12);
    assert_eq!(layout.unit, LayoutUnit::Grid);
    assert_eq!(layout.widgets.len(), 4);
    assert!(!has_overlaps(layout));
    assert_eq!(engine.container(), None);
}

#[test]
fn invalid_config_is_rejected() {
    let config = DashboardConfig::default().with_grid(0, 80.0, 16.0);
    assert!(DashboardEngine::new(NullSource, config).is_err());

    let config = DashboardConfig::default().with_padding(-1.0);
    assert!(DashboardEngine::new(NullSource, config).is_err());
}

#[test]
fn add_widget_places_below_existing_widgets_and_persists() {
    let mut engine = engine();
    let id = engine.add_widget(WidgetType::LineChart).expect("add widget");

    let widget = engine.widget(&id).expect("added widget");
    assert_eq!(widget.rect(), Rect::new(0.0, 6.0, 6.0, 4.0));
    assert_eq!(widget.title.as_deref(), Some("Trend"));
    assert_eq!(engine.layout().widgets.last().map(|w| &w.id), Some(&id));
    assert_eq!(engine.store().save_count(), 1);
    assert_eq!(engine.store().last_saved(), Some(engine.layout()));
}

#[test]
fn inserting_a_taken_id_gets_a_fresh_one() {
    let mut engine = engine();
    let taken = engine.layout().widgets[0].id.clone();
    let widget = Widget::new(
        taken.clone(),
        WidgetKind::for_type(WidgetType::StatusBar),
        Rect::new(3.0, 3.0, 4.0, 1.0),
    );
    let id = engine.insert_widget(widget).expect("insert");
    assert_ne!(id, taken);
    assert_eq!(engine.layout().widgets.len(), 5);
    assert_eq!(engine.widget(&id).expect("inserted").rect().y, 6.0);
}

#[test]
fn add_widget_on_pixel_canvas_uses_pixel_size() {
    let mut engine = DashboardEngine::with_store(
        sample_vault(),
        MemoryStore::default(),
        DashboardConfig::default().with_canvas_unit(LayoutUnit::Px),
    )
    .expect("engine");
    engine.set_container(CONTAINER).expect("container");
    let id = engine.add_widget(WidgetType::Stats).expect("add widget");
    let rect = engine.widget(&id).expect("added").rect();
    assert_eq!((rect.x, rect.w, rect.h), (0.0, 272.0, 176.0));
}

#[test]
fn remove_widget_returns_it_and_rejects_unknown_ids() {
    let mut engine = engine();
    let id = engine.layout().widgets[1].id.clone();
    let removed = engine.remove_widget(&id).expect("remove");
    assert_eq!(removed.id, id);
    assert_eq!(engine.layout().widgets.len(), 3);
    assert!(matches!(
        engine.remove_widget(&id),
        Err(DashboardError::UnknownWidget(_))
    ));
    assert_eq!(engine.store().save_count(), 1);
}

#[test]
fn update_widget_keeps_id_and_commits_legacy_migration() {
    let mut engine = engine();
    let layout = Layout::default().with_widgets(vec![Widget::new(
        "legacy",
        WidgetKind::TaskList(TaskListConfig {
            legacy: dashboard_rs::widgets::LegacyFilterFields {
                query: Some("#work".to_owned()),
                tag_filter: None,
            },
            ..TaskListConfig::default()
        }),
        Rect::new(0.0, 0.0, 4.0, 4.0),
    )]);
    engine.load_layout(&layout).expect("load");
    assert_eq!(engine.store().save_count(), 0);

    engine
        .update_widget("legacy", |widget| {
            widget.id = "renamed".to_owned();
            widget.title = Some("Work".to_owned());
        })
        .expect("update");

    let widget = engine.widget("legacy").expect("id unchanged");
    assert_eq!(widget.title.as_deref(), Some("Work"));
    let WidgetKind::TaskList(config) = &widget.kind else {
        panic!("kind changed");
    };
    assert_eq!(config.filters, vec![Filter::default().with_tags("work")]);
    assert!(config.legacy.is_empty());
    assert_eq!(engine.store().save_count(), 1);

    assert!(matches!(
        engine.update_widget("missing", |_| {}),
        Err(DashboardError::UnknownWidget(_))
    ));
}

#[test]
fn update_widget_repairs_bad_geometry() {
    let mut engine = engine();
    let id = engine.layout().widgets[0].id.clone();
    engine
        .update_widget(&id, |widget| widget.w = 40.0)
        .expect("update");
    assert_eq!(engine.widget(&id).expect("widget").rect().w, 12.0);
    assert!(!has_overlaps(engine.layout()));
}

#[test]
fn reset_restores_the_default_widgets() {
    let mut engine = engine();
    let old_ids: Vec<String> = engine.layout().widgets.iter().map(|w| w.id.clone()).collect();
    engine.remove_widget(&old_ids[0]).expect("remove");
    engine.reset_layout().expect("reset");

    let layout = engine.layout();
    assert_eq!(layout.widgets.len(), 4);
    assert!(layout.widgets.iter().all(|w| !old_ids.contains(&w.id)));
    assert_eq!(engine.store().save_count(), 2);
}

#[test]
fn failed_saves_keep_the_in_memory_layout() {
    let mut engine =
        DashboardEngine::with_store(sample_vault(), FailingStore::default(), DashboardConfig::default())
            .expect("engine");
    let id = engine.add_widget(WidgetType::Stats).expect("add despite save failure");
    assert!(engine.widget(&id).is_some());
    assert_eq!(engine.store().attempts, 1);
}

#[test]
fn container_measurement_migrates_to_pixels_once() {
    let mut engine = DashboardEngine::with_store(
        sample_vault(),
        MemoryStore::default(),
        DashboardConfig::default().with_canvas_unit(LayoutUnit::Px),
    )
    .expect("engine");
    assert!(engine.set_container(ContainerSize::new(0.0, 10.0)).is_err());

    engine.set_container(CONTAINER).expect("container");
    assert_eq!(engine.layout().unit, LayoutUnit::Px);
    assert_eq!(engine.store().save_count(), 1);
    let migrated = engine.layout().clone();

    engine
        .set_container(ContainerSize::new(2_000.0, 900.0))
        .expect("container");
    assert_eq!(engine.layout(), &migrated);
    assert_eq!(engine.store().save_count(), 1);
}

#[test]
fn grid_canvas_never_migrates() {
    let mut engine = engine();
    engine.set_container(CONTAINER).expect("container");
    assert_eq!(engine.layout().unit, LayoutUnit::Grid);
    assert_eq!(engine.store().save_count(), 0);
}

#[test]
fn evaluation_results_are_cached_per_widget() {
    let mut engine = engine();
    let ids: Vec<String> = engine.layout().widgets.iter().map(|w| w.id.clone()).collect();

    let notes = engine.evaluate_widget(&ids[0], now()).expect("evaluate");
    let WidgetData::Stat(stat) = &notes else {
        panic!("expected stat data, got {notes:?}");
    };
    assert_eq!(stat.value, 5);
    assert_eq!(engine.widget_data(&ids[0]), Some(&notes));
    assert!(engine.widget_data(&ids[1]).is_none());

    let all = engine.evaluate_all(now());
    assert_eq!(all.len(), 4);
    assert!(ids.iter().all(|id| engine.widget_data(id).is_some()));

    assert!(matches!(
        engine.evaluate_widget("missing", now()),
        Err(DashboardError::UnknownWidget(_))
    ));
}

#[test]
fn toggling_a_task_rewrites_the_line_and_clears_cached_data() {
    let mut engine = engine();
    let list = engine.layout().widgets[2].id.clone();
    let WidgetData::TaskList(before) = engine.evaluate_widget(&list, now()).expect("evaluate")
    else {
        panic!("expected task list");
    };
    assert_eq!(before.total, 4);

    assert!(engine.toggle_task("Projects/alpha.md", 3));
    assert!(engine.widget_data(&list).is_none());
    assert!(
        engine
            .source()
            .file("Projects/alpha.md")
            .expect("file")
            .contains("- [x] Ship it")
    );

    let WidgetData::TaskList(after) = engine.evaluate_widget(&list, now()).expect("evaluate")
    else {
        panic!("expected task list");
    };
    assert_eq!(after.total, 3);

    assert!(!engine.toggle_task("Projects/alpha.md", 0));
    assert!(!engine.toggle_task("missing.md", 3));
}

#[test]
fn loading_json_normalizes_the_document() {
    let mut engine = engine();
    let json = r#"{
        "schemaVersion": 1,
        "layout": {
            "columns": 12,
            "widgets": [
                { "id": "a", "type": "stats", "x": 0, "y": 0, "w": 3, "h": 2 },
                { "id": "b", "type": "stats", "x": 1, "y": 1, "w": 3, "h": 2 }
            ]
        }
    }"#;
    engine.load_layout_json(json).expect("load");
    assert_eq!(engine.layout().widgets.len(), 2);
    assert_eq!(engine.widget("b").expect("b").rect().y, 2.0);
    assert_eq!(engine.store().save_count(), 0);

    assert!(engine.load_layout_json("not json").is_err());
    assert_eq!(engine.layout().widgets.len(), 2);
}

#[test]
fn parts_can_be_taken_back() {
    let mut engine = engine();
    engine.add_widget(WidgetType::PieChart).expect("add");
    let (source, store) = engine.into_parts();
    assert_eq!(source.pages().len(), 5);
    assert_eq!(store.save_count(), 1);
}
