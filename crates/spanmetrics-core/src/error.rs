//! Shared error type across spanmetrics crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, SpanMetricsError>;

/// Unified error type used by core and exporter.
///
/// Nothing on the span recording path returns these to its caller; they
/// travel through the exporter's error hook, or out of config loading.
#[derive(Debug, Error)]
pub enum SpanMetricsError {
    #[error("cannot register the collector: {0}")]
    Registration(String),
    #[error("cannot create histogram {name}: {reason}")]
    HistogramCreate { name: String, reason: String },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}
