mod data_controller;
mod engine;
mod engine_config;
mod fetch;
mod interaction_controller;
mod json_contract;
mod layout_controller;
mod store;
mod widget_data;

pub use engine::DashboardEngine;
pub use engine_config::DashboardConfig;
pub use fetch::{FetchRegistry, FetchTicket};
pub use json_contract::{LAYOUT_DOCUMENT_JSON_SCHEMA_V1, LayoutDocumentV1};
pub use store::{LayoutStore, MemoryStore, NullStore};
pub use widget_data::{
    ChartData, ComparisonData, ProgressData, StatData, TaskListData, WidgetData, evaluate_widget,
};
