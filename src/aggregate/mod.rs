//! Aggregation Engine: retrieval, dedup, time windows, grouping and comparison.

mod comparison;
mod grouping;
mod runner;
mod series;
mod window;

pub use comparison::{
    CompareBasis, CompareDisplay, CompareMode, ComparisonOutcome, apply_comparison_basis,
    percent_delta,
};
pub use grouping::{
    EMPTY_BUCKET, GroupField, NamedValue, ROOT_BUCKET, UNTAGGED_BUCKET, group_pages,
};
pub use runner::{CountResult, CountTarget, QueryRunner};
pub use series::{Series, SeriesCountMode};
pub use window::{TimeField, in_window, page_timestamp, parse_timestamp, task_timestamp};
