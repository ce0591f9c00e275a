//! Time Range Resolver: symbolic presets to concrete local-time windows.

mod presets;
mod range;

pub use presets::{
    ALL_PRESET_ID, CUSTOM_PRESET_ID, CalendarPeriod, PresetKind, TimePreset,
    default_time_presets, is_known_preset, preset_label,
};
pub use range::{
    ResolvedRange, TimeRangeConfig, derive_previous_range, parse_calendar_date,
    range_has_bounds, resolve_time_range,
};
pub(crate) use range::day_start;
