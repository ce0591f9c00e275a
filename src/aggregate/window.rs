use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::source::{Page, Task};
use crate::time::{ResolvedRange, day_start, parse_calendar_date};

/// Which file timestamp a time window applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    #[default]
    #[serde(alias = "ctime")]
    Created,
    #[serde(alias = "mtime")]
    Modified,
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses a provider timestamp into local wall-clock time.
///
/// Accepts RFC 3339, naive ISO date-times, bare dates (start of day) and
/// integer epoch milliseconds.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) || (raw.starts_with('-') && raw.len() > 1) {
        if let Ok(millis) = raw.parse::<i64>() {
            return DateTime::from_timestamp_millis(millis)
                .map(|utc| utc.with_timezone(&Local).naive_local());
        }
    }

    if let Ok(stamped) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamped.with_timezone(&Local).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive);
        }
    }

    if raw.len() == 10 {
        return parse_calendar_date(raw).map(day_start);
    }
    None
}

#[must_use]
pub fn page_timestamp(page: &Page, field: TimeField) -> Option<&str> {
    match field {
        TimeField::Created => page.ctime.as_deref(),
        TimeField::Modified => page.mtime.as_deref(),
    }
}

#[must_use]
pub fn task_timestamp(task: &Task, field: TimeField) -> Option<&str> {
    match field {
        TimeField::Created => task.file_ctime.as_deref(),
        TimeField::Modified => task.file_mtime.as_deref(),
    }
}

/// Window test used after retrieval.
///
/// Unbounded windows accept everything. Bounded windows reject items whose
/// timestamp is missing or unparseable.
#[must_use]
pub fn in_window(raw: Option<&str>, range: &ResolvedRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    raw.and_then(parse_timestamp)
        .is_some_and(|instant| range.contains(instant))
}
