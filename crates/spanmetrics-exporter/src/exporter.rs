//! Span exporter surface: options plus the recording hot path.

use std::sync::Arc;

use prometheus::Registry;

use spanmetrics_core::{name, SpanMetricsError, SpanRecord};

use crate::collector::SpanCollector;
use crate::config::ExporterConfig;

/// Side-channel fault reporting. Recording never returns errors to the
/// pipeline feeding it; everything lands here instead.
pub type ErrorHook = Arc<dyn Fn(&SpanMetricsError) + Send + Sync>;

/// Options for building a [`SpanExporter`].
#[derive(Default)]
pub struct ExporterOptions {
    /// Optional metric name prefix (`namespace_<name>`).
    pub namespace: String,
    /// Backend registry to register with; a private one is created when
    /// absent.
    pub registry: Option<Registry>,
    /// Fault callback; defaults to log-and-continue.
    pub on_error: Option<ErrorHook>,
}

impl From<&ExporterConfig> for ExporterOptions {
    fn from(cfg: &ExporterConfig) -> Self {
        Self {
            namespace: cfg.exporter.namespace.clone(),
            ..Self::default()
        }
    }
}

/// Converts completed spans into duration-histogram observations.
pub struct SpanExporter {
    collector: SpanCollector,
}

impl SpanExporter {
    pub fn new(options: ExporterOptions) -> Self {
        let registry = options.registry.unwrap_or_default();
        let on_error: ErrorHook = options.on_error.unwrap_or_else(|| {
            Arc::new(|err: &SpanMetricsError| {
                tracing::warn!(%err, "failed to export spans to the metrics backend");
            })
        });
        Self {
            collector: SpanCollector::new(options.namespace, registry, on_error),
        }
    }

    /// Record one completed span.
    ///
    /// Path-like names (`/users/42`) and names that sanitize to nothing
    /// are dropped silently. Never fails: faults go through the error
    /// hook, and malformed durations clamp to zero.
    pub fn export_span(&self, span: &SpanRecord) {
        if name::is_path_like(&span.name) {
            return;
        }
        let Some(histogram) = self.collector.histogram_for(&span.name) else {
            return;
        };
        histogram.observe(span.duration_millis() as f64);
    }

    /// The backend registry this exporter registers with; hand this to
    /// the scrape transport.
    pub fn registry(&self) -> &Registry {
        self.collector.registry()
    }
}
