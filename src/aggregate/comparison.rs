use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

use super::runner::CountResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareMode {
    #[default]
    None,
    PreviousPeriod,
    FixedPeriod,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareBasis {
    #[default]
    Total,
    PerDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareDisplay {
    #[default]
    Number,
    Percent,
}

/// Normalizes a count for comparison.
///
/// `PerDay` needs the day count of a bounded range; callers check
/// `range_has_bounds` first. A missing or non-positive day count is an error
/// rather than a NaN.
pub fn apply_comparison_basis(result: &CountResult, basis: CompareBasis) -> DashboardResult<f64> {
    let count = result.count as f64;
    match basis {
        CompareBasis::Total => Ok(count),
        CompareBasis::PerDay => match result.days {
            Some(days) if days > 0 => Ok(count / days as f64),
            _ => Err(DashboardError::UnboundedRange(
                "per-day basis requires a bounded time range",
            )),
        },
    }
}

/// `(primary - compare) / compare * 100`, or `None` when `compare` is zero.
#[must_use]
pub fn percent_delta(primary: f64, compare: f64) -> Option<f64> {
    if compare == 0.0 || !compare.is_finite() || !primary.is_finite() {
        return None;
    }
    Some((primary - compare) / compare * 100.0)
}

/// Primary value next to its comparison baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub label: String,
    pub primary: f64,
    pub compare: f64,
    pub delta: f64,
    pub percent: Option<f64>,
    pub display: CompareDisplay,
}

impl ComparisonOutcome {
    #[must_use]
    pub fn new(label: impl Into<String>, primary: f64, compare: f64, display: CompareDisplay) -> Self {
        Self {
            label: label.into(),
            primary,
            compare,
            delta: primary - compare,
            percent: percent_delta(primary, compare),
            display,
        }
    }

    /// Signed text for the configured display, e.g. `+3`, `-1.5`, `+20.0%`, `n/a`.
    #[must_use]
    pub fn formatted(&self) -> String {
        match self.display {
            CompareDisplay::Number => format_signed(self.delta),
            CompareDisplay::Percent => self
                .percent
                .map_or_else(|| "n/a".to_owned(), |percent| format!("{percent:+.1}%")),
        }
    }
}

fn format_signed(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:+}", value as i64)
    } else {
        format!("{value:+.2}")
    }
}
