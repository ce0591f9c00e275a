use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    #[error("invalid container size: width={width}, height={height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    #[error("time range is unbounded: {0}")]
    UnboundedRange(&'static str),

    #[error("data source error: {0}")]
    Source(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
