use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::lenient::{lenient_f64, lenient_u32};
use crate::error::{DashboardError, DashboardResult};
use crate::layout::{DEFAULT_COLUMNS, DEFAULT_GAP, DEFAULT_ROW_HEIGHT, Layout, LayoutUnit};
use crate::widgets::Widget;

pub const LAYOUT_DOCUMENT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDocumentV1 {
    pub schema_version: u32,
    pub layout: Layout,
}

/// Layout fields other than widgets, read on their own so one bad widget
/// cannot fail the document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutHeader {
    #[serde(default = "default_columns", deserialize_with = "lenient_u32")]
    columns: u32,
    #[serde(default = "default_row_height", deserialize_with = "lenient_f64")]
    row_height: f64,
    #[serde(default = "default_gap", deserialize_with = "lenient_f64")]
    gap: f64,
    #[serde(default)]
    unit: LayoutUnit,
}

impl Layout {
    pub fn to_json_contract_v1_pretty(&self) -> DashboardResult<String> {
        let payload = LayoutDocumentV1 {
            schema_version: LAYOUT_DOCUMENT_JSON_SCHEMA_V1,
            layout: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DashboardError::InvalidData(format!("failed to serialize layout contract v1: {e}"))
        })
    }

    /// Reads a v1 document or a bare layout.
    ///
    /// Widgets that fail to parse (unknown `type`, wrong field shapes) are
    /// skipped with a warning. The result is not normalized.
    pub fn from_json_compat_str(input: &str) -> DashboardResult<Self> {
        let document: Value = serde_json::from_str(input).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse layout json payload: {e}"))
        })?;

        let layout_value = match document.get("schemaVersion") {
            None => document,
            Some(version) => {
                if version.as_u64() != Some(u64::from(LAYOUT_DOCUMENT_JSON_SCHEMA_V1)) {
                    return Err(DashboardError::InvalidData(format!(
                        "unsupported layout schema version: {version}"
                    )));
                }
                document.get("layout").cloned().ok_or_else(|| {
                    DashboardError::InvalidLayout("document has no layout".to_owned())
                })?
            }
        };

        if !layout_value.is_object() {
            return Err(DashboardError::InvalidLayout(
                "layout payload must be a json object".to_owned(),
            ));
        }
        let header: LayoutHeader = serde_json::from_value(layout_value.clone()).map_err(|e| {
            DashboardError::InvalidData(format!("failed to parse layout header: {e}"))
        })?;

        let widgets = match layout_value.get("widgets") {
            Some(Value::Array(items)) => read_widgets(items),
            Some(Value::Null) | None => Vec::new(),
            Some(_) => {
                warn!("layout widgets is not an array; ignoring");
                Vec::new()
            }
        };

        Ok(Self {
            columns: header.columns,
            row_height: header.row_height,
            gap: header.gap,
            unit: header.unit,
            widgets,
        })
    }
}

fn read_widgets(items: &[Value]) -> Vec<Widget> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match Widget::deserialize(item) {
            Ok(widget) => Some(widget),
            Err(err) => {
                let widget_id = item.get("id").and_then(Value::as_str).unwrap_or("");
                warn!(error = %err, index, widget_id, "skipping malformed widget");
                None
            }
        })
        .collect()
}

fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

fn default_row_height() -> f64 {
    DEFAULT_ROW_HEIGHT
}

fn default_gap() -> f64 {
    DEFAULT_GAP
}
