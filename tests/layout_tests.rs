use dashboard_rs::core::Rect;
use dashboard_rs::layout::{
    DEFAULT_COLUMNS, DEFAULT_GAP, DEFAULT_ROW_HEIGHT, Layout, LayoutUnit, has_overlaps,
    next_free_row, normalize_layout, place_widget, resolve_collisions,
    resolve_collisions_with_limit,
};
use dashboard_rs::widgets::{Widget, WidgetKind, WidgetType, default_widgets};

fn widget(id: &str, widget_type: WidgetType, rect: Rect) -> Widget {
    Widget::new(id, WidgetKind::for_type(widget_type), rect)
}

fn stats(id: &str, x: f64, y: f64, w: f64, h: f64) -> Widget {
    widget(id, WidgetType::Stats, Rect::new(x, y, w, h))
}

fn rect_of(layout: &Layout, id: &str) -> Rect {
    layout.widget(id).expect("widget present").rect()
}

#[test]
fn moved_widget_keeps_its_spot_and_displaces_the_other() {
    let layout = Layout::new(4, 80.0, 16.0).with_widgets(vec![
        stats("A", 0.0, 0.0, 2.0, 3.0),
        stats("B", 0.0, 0.0, 2.0, 3.0),
    ]);
    let resolved = resolve_collisions(&layout, Some("B"));
    assert_eq!(rect_of(&resolved, "B"), Rect::new(0.0, 0.0, 2.0, 3.0));
    assert_eq!(rect_of(&resolved, "A"), Rect::new(0.0, 3.0, 2.0, 3.0));
    assert_eq!(resolved.widgets[0].id, "A");
    assert!(!has_overlaps(&resolved));
}

#[test]
fn without_a_moved_widget_the_topmost_wins() {
    let layout = Layout::default().with_widgets(vec![
        stats("low", 1.0, 1.0, 3.0, 2.0),
        stats("high", 0.0, 0.0, 3.0, 2.0),
        stats("side", 6.0, 0.0, 3.0, 2.0),
    ]);
    let resolved = resolve_collisions(&layout, None);
    assert_eq!(rect_of(&resolved, "high"), Rect::new(0.0, 0.0, 3.0, 2.0));
    assert_eq!(rect_of(&resolved, "low"), Rect::new(1.0, 2.0, 3.0, 2.0));
    assert_eq!(rect_of(&resolved, "side"), Rect::new(6.0, 0.0, 3.0, 2.0));
}

#[test]
fn pushes_cascade_through_stacked_widgets() {
    let layout = Layout::default().with_widgets(vec![
        stats("a", 0.0, 0.0, 4.0, 2.0),
        stats("b", 0.0, 2.0, 4.0, 2.0),
        stats("drop", 0.0, 1.0, 4.0, 2.0),
    ]);
    let resolved = resolve_collisions(&layout, Some("drop"));
    assert_eq!(rect_of(&resolved, "drop").y, 1.0);
    assert_eq!(rect_of(&resolved, "a").y, 3.0);
    assert_eq!(rect_of(&resolved, "b").y, 5.0);
    assert!(!has_overlaps(&resolved));
}

#[test]
fn iteration_limit_leaves_widget_where_it_stopped() {
    let layout = Layout::default().with_widgets(vec![
        stats("top", 0.0, 0.0, 2.0, 2.0),
        stats("second", 0.0, 1.0, 2.0, 2.0),
        stats("moved", 0.0, 3.0, 2.0, 2.0),
    ]);
    let limited = resolve_collisions_with_limit(&layout, Some("moved"), 1);
    assert_eq!(rect_of(&limited, "second").y, 2.0);
    assert!(has_overlaps(&limited));

    let resolved = resolve_collisions(&layout, Some("moved"));
    assert_eq!(rect_of(&resolved, "second").y, 5.0);
    assert!(!has_overlaps(&resolved));
}

#[test]
fn normalization_repairs_metrics() {
    let mut layout = Layout::new(0, -5.0, f64::NAN);
    assert_eq!(normalize_layout(&layout).columns, DEFAULT_COLUMNS);
    assert_eq!(normalize_layout(&layout).row_height, DEFAULT_ROW_HEIGHT);
    assert_eq!(normalize_layout(&layout).gap, DEFAULT_GAP);

    layout.gap = -3.0;
    assert_eq!(normalize_layout(&layout).gap, 0.0);
}

#[test]
fn normalization_fills_missing_geometry_from_type_defaults() {
    let layout = Layout::default().with_widgets(vec![widget(
        "w",
        WidgetType::LineChart,
        Rect::new(f64::NAN, f64::INFINITY, f64::NAN, f64::NAN),
    )]);
    let normalized = normalize_layout(&layout);
    assert_eq!(rect_of(&normalized, "w"), Rect::new(0.0, 0.0, 6.0, 4.0));
}

#[test]
fn normalization_floors_and_clamps_into_the_grid() {
    let layout = Layout::default().with_widgets(vec![
        stats("wide", 3.0, 0.0, 20.0, 0.0),
        stats("edge", 11.0, 4.7, 4.9, 2.2),
        stats("neg", -2.0, -1.0, 2.0, 1.0),
    ]);
    let normalized = normalize_layout(&layout);
    assert_eq!(rect_of(&normalized, "wide"), Rect::new(0.0, 0.0, 12.0, 1.0));
    assert_eq!(rect_of(&normalized, "edge"), Rect::new(8.0, 4.0, 4.0, 2.0));
    assert_eq!(rect_of(&normalized, "neg"), Rect::new(0.0, 1.0, 2.0, 1.0));
}

#[test]
fn normalization_replaces_blank_and_duplicate_ids() {
    let layout = Layout::default().with_widgets(vec![
        stats("same", 0.0, 0.0, 2.0, 2.0),
        stats("same", 4.0, 0.0, 2.0, 2.0),
        stats("  ", 8.0, 0.0, 2.0, 2.0),
    ]);
    let normalized = normalize_layout(&layout);
    assert_eq!(normalized.widgets[0].id, "same");
    assert_ne!(normalized.widgets[1].id, "same");
    assert!(!normalized.widgets[2].id.trim().is_empty());
    assert_ne!(normalized.widgets[1].id, normalized.widgets[2].id);
    assert_eq!(normalized.widgets[1].rect(), Rect::new(4.0, 0.0, 2.0, 2.0));
}

#[test]
fn normalization_is_idempotent_and_overlap_free() {
    let layout = Layout::default().with_widgets(vec![
        stats("a", 0.5, 0.0, 6.0, 3.0),
        stats("b", 2.0, 1.0, 6.0, 3.0),
        widget("c", WidgetType::PieChart, Rect::new(f64::NAN, 2.0, 4.0, 4.0)),
    ]);
    let once = normalize_layout(&layout);
    assert!(!has_overlaps(&once));
    assert_eq!(normalize_layout(&once), once);
}

#[test]
fn pixel_layouts_get_pixel_fallback_sizes() {
    let mut layout = Layout::default().with_widgets(vec![widget(
        "px",
        WidgetType::Stats,
        Rect::new(10.4, 20.9, f64::NAN, f64::NAN),
    )]);
    layout.unit = LayoutUnit::Px;
    let normalized = normalize_layout(&layout);
    // 3 x 2 cells at an 80px row with 16px gaps.
    assert_eq!(rect_of(&normalized, "px"), Rect::new(10.0, 20.0, 272.0, 176.0));
}

#[test]
fn lenient_json_geometry_is_repaired() {
    let json = r#"{
        "columns": "twelve",
        "widgets": [
            { "id": "w", "type": "status-bar", "x": "left", "y": null, "w": "4", "h": 1 }
        ]
    }"#;
    let layout = Layout::from_json_str(json).expect("lenient parse");
    assert_eq!(layout.columns, 0);
    let normalized = normalize_layout(&layout);
    assert_eq!(normalized.columns, DEFAULT_COLUMNS);
    assert_eq!(rect_of(&normalized, "w"), Rect::new(0.0, 0.0, 4.0, 1.0));
}

#[test]
fn default_widgets_do_not_overlap() {
    let layout = Layout::default().with_widgets(default_widgets());
    assert_eq!(layout.widgets.len(), 4);
    assert!(!has_overlaps(&layout));
    assert_eq!(normalize_layout(&layout), layout);
}

#[test]
fn placement_appends_below_everything() {
    assert_eq!(next_free_row(&Layout::default()), 0.0);

    let layout = Layout::default().with_widgets(vec![
        stats("a", 0.0, 0.0, 3.0, 2.0),
        stats("b", 6.0, 1.0, 3.0, 4.0),
    ]);
    assert_eq!(next_free_row(&layout), 5.0);

    let placed = place_widget(&layout, stats("new", 9.0, 0.0, 3.0, 2.0), 1_000);
    assert_eq!(rect_of(&placed, "new"), Rect::new(0.0, 5.0, 3.0, 2.0));
    assert_eq!(placed.widgets.last().map(|w| w.id.as_str()), Some("new"));
    assert!(!has_overlaps(&placed));
}
