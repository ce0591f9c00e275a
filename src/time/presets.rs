use serde::{Deserialize, Serialize};

pub const ALL_PRESET_ID: &str = "all";
pub const CUSTOM_PRESET_ID: &str = "custom";

/// Named calendar windows. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalendarPeriod {
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PresetKind {
    /// No bounds.
    All,
    /// Day offsets relative to the reference day. `0` is today, `-1` yesterday.
    #[serde(rename_all = "camelCase")]
    Relative {
        start_offset_days: i64,
        end_offset_days: i64,
    },
    Calendar { period: CalendarPeriod },
}

/// User-configurable symbolic time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreset {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: PresetKind,
}

impl TimePreset {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: PresetKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
        }
    }

    #[must_use]
    pub fn relative(
        id: impl Into<String>,
        label: impl Into<String>,
        start_offset_days: i64,
        end_offset_days: i64,
    ) -> Self {
        Self::new(
            id,
            label,
            PresetKind::Relative {
                start_offset_days,
                end_offset_days,
            },
        )
    }

    #[must_use]
    pub fn calendar(id: impl Into<String>, label: impl Into<String>, period: CalendarPeriod) -> Self {
        Self::new(id, label, PresetKind::Calendar { period })
    }
}

/// Preset catalogue shipped when the host has no user configuration.
#[must_use]
pub fn default_time_presets() -> Vec<TimePreset> {
    vec![
        TimePreset::new(ALL_PRESET_ID, "All time", PresetKind::All),
        TimePreset::relative("today", "Today", 0, 0),
        TimePreset::relative("yesterday", "Yesterday", -1, -1),
        TimePreset::relative("last-7-days", "Last 7 days", -6, 0),
        TimePreset::relative("last-30-days", "Last 30 days", -29, 0),
        TimePreset::relative("last-90-days", "Last 90 days", -89, 0),
        TimePreset::calendar("this-week", "This week", CalendarPeriod::ThisWeek),
        TimePreset::calendar("last-week", "Last week", CalendarPeriod::LastWeek),
        TimePreset::calendar("this-month", "This month", CalendarPeriod::ThisMonth),
        TimePreset::calendar("last-month", "Last month", CalendarPeriod::LastMonth),
        TimePreset::calendar("this-year", "This year", CalendarPeriod::ThisYear),
        TimePreset::calendar("last-year", "Last year", CalendarPeriod::LastYear),
    ]
}

/// Display label for a preset id.
///
/// Ids missing from `presets` yield a recognizable placeholder instead of an
/// error, so stale widget configs still render.
#[must_use]
pub fn preset_label(id: &str, presets: &[TimePreset]) -> String {
    if id == CUSTOM_PRESET_ID {
        return "Custom range".to_owned();
    }
    presets
        .iter()
        .find(|preset| preset.id == id)
        .map(|preset| preset.label.clone())
        .unwrap_or_else(|| format!("Unknown preset ({id})"))
}

#[must_use]
pub fn is_known_preset(id: &str, presets: &[TimePreset]) -> bool {
    id == CUSTOM_PRESET_ID || presets.iter().any(|preset| preset.id == id)
}
