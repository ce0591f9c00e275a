//! Subscriber setup for hosts embedding `dashboard-rs`.
//!
//! Events worth enabling per target:
//! - `dashboard_rs::aggregate` warns when a provider query fails and the
//!   filter degrades to an empty result.
//! - `dashboard_rs::api` warns on failed layout saves and malformed persisted
//!   widgets, and logs superseded or stale fetches at `debug`.
//! - `dashboard_rs::layout` warns when collision resolution hits its
//!   iteration limit.
//!
//! Hosts either call [`init_default_tracing`] or install their own subscriber.

/// Installs a compact subscriber filtered by `RUST_LOG`, defaulting to
/// `dashboard_rs=warn`.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dashboard_rs=warn")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
