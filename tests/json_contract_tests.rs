use dashboard_rs::api::{LAYOUT_DOCUMENT_JSON_SCHEMA_V1, LayoutDocumentV1};
use dashboard_rs::core::Rect;
use dashboard_rs::error::DashboardError;
use dashboard_rs::layout::{Layout, LayoutUnit};
use dashboard_rs::widgets::{TitleSide, TitleSize, WidgetKind, WidgetType, default_widgets};

#[test]
fn v1_contract_round_trips() {
    let mut widgets = default_widgets();
    widgets[0] = widgets[0].clone().with_header_icon("lucide-file-text");
    let layout = Layout::default().with_widgets(widgets);
    let json = layout.to_json_contract_v1_pretty().expect("serialize");

    let document: LayoutDocumentV1 = serde_json::from_str(&json).expect("typed parse");
    assert_eq!(document.schema_version, LAYOUT_DOCUMENT_JSON_SCHEMA_V1);
    assert!(json.contains("\"schemaVersion\": 1"));
    assert!(json.contains("\"rowHeight\""));
    assert!(json.contains("\"headerIcon\": \"lucide-file-text\""));

    let parsed = Layout::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(parsed, layout);
}

#[test]
fn bare_layout_is_accepted() {
    let json = r#"{
        "columns": 8,
        "rowHeight": 60,
        "gap": 8,
        "unit": "px",
        "widgets": [
            {
                "id": "w",
                "type": "pie-chart",
                "x": 10, "y": 20, "w": 300, "h": 200,
                "titleSize": "large",
                "titleSide": "center",
                "groupBy": "folder"
            }
        ]
    }"#;
    let layout = Layout::from_json_compat_str(json).expect("parse");
    assert_eq!(layout.columns, 8);
    assert_eq!(layout.row_height, 60.0);
    assert_eq!(layout.unit, LayoutUnit::Px);

    let widget = &layout.widgets[0];
    assert_eq!(widget.widget_type(), WidgetType::PieChart);
    assert_eq!(widget.rect(), Rect::new(10.0, 20.0, 300.0, 200.0));
    assert_eq!(widget.title_size, TitleSize::Large);
    assert_eq!(widget.title_side, TitleSide::Center);
    assert!(matches!(widget.kind, WidgetKind::PieChart(_)));
}

#[test]
fn malformed_widgets_are_skipped() {
    let json = r#"{
        "widgets": [
            { "id": "clock", "type": "clock", "x": 0, "y": 0, "w": 2, "h": 2 },
            { "id": "ok", "type": "stats", "x": 0, "y": 0, "w": 3, "h": 2 },
            { "id": "broken", "type": "task-list", "showCompleted": "sometimes" },
            42
        ]
    }"#;
    let layout = Layout::from_json_compat_str(json).expect("parse");
    let ids: Vec<&str> = layout.widgets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, vec!["ok"]);
    assert_eq!(layout.columns, 12);
}

#[test]
fn missing_widgets_mean_an_empty_dashboard() {
    let layout = Layout::from_json_compat_str("{}").expect("parse");
    assert!(layout.widgets.is_empty());

    let layout = Layout::from_json_compat_str(r#"{ "widgets": "nope" }"#).expect("parse");
    assert!(layout.widgets.is_empty());
}

#[test]
fn unsupported_documents_are_rejected() {
    let future = r#"{ "schemaVersion": 2, "layout": { "widgets": [] } }"#;
    let err = Layout::from_json_compat_str(future).expect_err("future schema");
    assert!(err.to_string().contains("schema version"));

    assert!(Layout::from_json_compat_str(r#"{ "schemaVersion": 1 }"#).is_err());
    assert!(matches!(
        Layout::from_json_compat_str("[1, 2]"),
        Err(DashboardError::InvalidLayout(_))
    ));
    assert!(Layout::from_json_compat_str("{ broken").is_err());
}
