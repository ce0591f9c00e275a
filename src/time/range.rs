use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::presets::{CUSTOM_PRESET_ID, CalendarPeriod, PresetKind, TimePreset};

const LAST_MILLISECOND_OF_DAY: i64 = 86_399_999;

/// Symbolic time range as stored in widget configs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeConfig {
    #[serde(default = "default_preset")]
    pub preset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Default for TimeRangeConfig {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            start: None,
            end: None,
        }
    }
}

impl TimeRangeConfig {
    #[must_use]
    pub fn preset(id: impl Into<String>) -> Self {
        Self {
            preset: id.into(),
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn custom(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            preset: CUSTOM_PRESET_ID.to_owned(),
            start: start.map(str::to_owned),
            end: end.map(str::to_owned),
        }
    }
}

fn default_preset() -> String {
    super::presets::ALL_PRESET_ID.to_owned()
}

/// Concrete window in local wall-clock time. Missing bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub days: Option<i64>,
}

impl ResolvedRange {
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// True when both bounds and the day count are known.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some() && self.days.is_some()
    }

    /// Inclusive containment; open sides accept everything.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant <= end)
    }

    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Guard callers use before per-day or previous-period math.
#[must_use]
pub fn range_has_bounds(range: &ResolvedRange) -> bool {
    range.is_bounded()
}

/// Resolves a symbolic range against the preset catalogue and a reference instant.
///
/// Unknown presets resolve to the unbounded range.
#[must_use]
pub fn resolve_time_range(
    range: &TimeRangeConfig,
    presets: &[TimePreset],
    now: NaiveDateTime,
) -> ResolvedRange {
    let preset_id = range.preset.trim();
    if preset_id == CUSTOM_PRESET_ID {
        return resolve_custom(range.start.as_deref(), range.end.as_deref());
    }

    let Some(preset) = presets.iter().find(|preset| preset.id == preset_id) else {
        trace!(preset = preset_id, "unknown time preset resolves unbounded");
        return ResolvedRange::unbounded();
    };

    match preset.kind {
        PresetKind::All => ResolvedRange::unbounded(),
        PresetKind::Relative {
            start_offset_days,
            end_offset_days,
        } => resolve_relative(start_offset_days, end_offset_days, now),
        PresetKind::Calendar { period } => resolve_calendar(period, now),
    }
}

/// Window of equal length immediately before `range`.
///
/// Returns `None` for ranges missing a bound or the day count.
#[must_use]
pub fn derive_previous_range(range: &ResolvedRange) -> Option<ResolvedRange> {
    let start = range.start?;
    range.end?;
    let days = range.days?;
    if days <= 0 {
        return None;
    }

    let end = start.checked_sub_signed(TimeDelta::milliseconds(1))?;
    let start_date = shift_days(end.date(), -(days - 1))?;
    Some(ResolvedRange {
        start: Some(day_start(start_date)),
        end: Some(end),
        days: Some(days),
    })
}

fn resolve_custom(start: Option<&str>, end: Option<&str>) -> ResolvedRange {
    let mut start_date = start.and_then(parse_calendar_date);
    let mut end_date = end.and_then(parse_calendar_date);
    if let (Some(s), Some(e)) = (start_date, end_date) {
        if e < s {
            start_date = Some(e);
            end_date = Some(s);
        }
    }

    let days = match (start_date, end_date) {
        (Some(s), Some(e)) => Some((e - s).num_days() + 1),
        _ => None,
    };

    ResolvedRange {
        start: start_date.map(day_start),
        end: end_date.and_then(day_end),
        days,
    }
}

fn resolve_relative(start_offset: i64, end_offset: i64, now: NaiveDateTime) -> ResolvedRange {
    let (first, last) = if start_offset <= end_offset {
        (start_offset, end_offset)
    } else {
        (end_offset, start_offset)
    };

    let today = now.date();
    let start = shift_days(today, first).map(day_start);
    let end = shift_days(today, last).and_then(day_end);
    let days = if start.is_some() && end.is_some() {
        Some(last - first + 1)
    } else {
        None
    };

    ResolvedRange { start, end, days }
}

fn resolve_calendar(period: CalendarPeriod, now: NaiveDateTime) -> ResolvedRange {
    let today = now.date();
    let elapsed = |first: NaiveDate| ResolvedRange {
        start: Some(day_start(first)),
        end: Some(now),
        days: Some((today - first).num_days() + 1),
    };
    let full = |first: Option<NaiveDate>, last: Option<NaiveDate>| match (first, last) {
        (Some(first), Some(last)) => ResolvedRange {
            start: Some(day_start(first)),
            end: day_end(last),
            days: Some((last - first).num_days() + 1),
        },
        _ => ResolvedRange::unbounded(),
    };

    match period {
        CalendarPeriod::ThisWeek => {
            let monday = week_start(today);
            monday.map_or_else(ResolvedRange::unbounded, elapsed)
        }
        CalendarPeriod::LastWeek => {
            let monday = week_start(today);
            full(
                monday.and_then(|m| shift_days(m, -7)),
                monday.and_then(|m| shift_days(m, -1)),
            )
        }
        CalendarPeriod::ThisMonth => today
            .with_day(1)
            .map_or_else(ResolvedRange::unbounded, elapsed),
        CalendarPeriod::LastMonth => {
            let last = today.with_day(1).and_then(|first| shift_days(first, -1));
            full(last.and_then(|l| l.with_day(1)), last)
        }
        CalendarPeriod::ThisYear => NaiveDate::from_ymd_opt(today.year(), 1, 1)
            .map_or_else(ResolvedRange::unbounded, elapsed),
        CalendarPeriod::LastYear => full(
            NaiveDate::from_ymd_opt(today.year() - 1, 1, 1),
            NaiveDate::from_ymd_opt(today.year() - 1, 12, 31),
        ),
    }
}

fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    shift_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Parses `YYYY-MM-DD`; longer inputs are read by their date prefix.
#[must_use]
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

pub(crate) fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    if offset >= 0 {
        date.checked_add_days(Days::new(offset.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(offset.unsigned_abs()))
    }
}

pub(crate) fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn day_end(date: NaiveDate) -> Option<NaiveDateTime> {
    day_start(date).checked_add_signed(TimeDelta::milliseconds(LAST_MILLISECOND_OF_DAY))
}
