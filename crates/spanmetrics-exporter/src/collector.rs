//! Lazily populated histogram registry behind a Prometheus collector.
//!
//! One histogram per sanitized span name, created on first observation and
//! kept for process lifetime. The name→histogram map is the only shared
//! state on the recording path; backend registration is guarded by a
//! separate one-shot primitive so the handshake never contends with
//! recording.

use std::sync::{Arc, Once};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use prometheus::core::{Collector, Desc};
use prometheus::proto::MetricFamily;
use prometheus::{Histogram, HistogramOpts, Registry};

use spanmetrics_core::{name, SpanMetricsError};

use crate::exporter::ErrorHook;

/// Histogram bucket upper bounds, in milliseconds.
///
/// 1ms to 2min: request handling lives mostly under a second, the tail
/// covers batch work.
pub const DURATION_BUCKETS_MS: [f64; 10] = [
    1.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 10000.0, 60000.0, 120000.0,
];

/// Span-duration histogram registry: `metric name -> Histogram`.
///
/// Clones share the same underlying map; the exporter keeps one clone and
/// the backend registry another (as a boxed collector).
#[derive(Clone)]
pub struct SpanCollector {
    inner: Arc<CollectorInner>,
}

struct CollectorInner {
    namespace: String,
    registry: Registry,
    on_error: ErrorHook,
    histograms: DashMap<String, Histogram>,
    register_once: Once,
}

impl SpanCollector {
    pub fn new(namespace: String, registry: Registry, on_error: ErrorHook) -> Self {
        Self {
            inner: Arc::new(CollectorInner {
                namespace,
                registry,
                on_error,
                histograms: DashMap::new(),
                register_once: Once::new(),
            }),
        }
    }

    /// Look up or lazily create the histogram for a span name.
    ///
    /// Returns `None` when the sanitized name is empty or the backend
    /// rejects the histogram options; the latter is reported through the
    /// error hook.
    pub fn histogram_for(&self, span_name: &str) -> Option<Histogram> {
        let sanitized = name::sanitize(span_name);
        if sanitized.is_empty() {
            return None;
        }
        let key = name::metric_name(&self.inner.namespace, span_name);

        // Fast path: shard read lock only.
        if let Some(h) = self.inner.histograms.get(&key) {
            return Some(h.clone());
        }

        // Miss: take the shard write lock and re-check, so concurrent
        // creators of an unseen name agree on a single instance.
        let histogram = match self.inner.histograms.entry(key.clone()) {
            Entry::Occupied(e) => e.get().clone(),
            Entry::Vacant(e) => {
                let opts = HistogramOpts::new(sanitized.clone(), sanitized)
                    .namespace(self.inner.namespace.clone())
                    .buckets(DURATION_BUCKETS_MS.to_vec());
                let h = match Histogram::with_opts(opts) {
                    Ok(h) => h,
                    Err(err) => {
                        (self.inner.on_error)(&SpanMetricsError::HistogramCreate {
                            name: key,
                            reason: err.to_string(),
                        });
                        return None;
                    }
                };
                tracing::debug!(metric = %key, "created span duration histogram");
                e.insert(h.clone());
                h
            }
        };

        self.ensure_registered();
        Some(histogram)
    }

    /// Register this collector with the backend registry exactly once.
    ///
    /// Called after the first successful histogram creation, so a registry
    /// that never saw a recordable span contributes nothing to a scrape. A
    /// refusal (duplicate collector on a shared registry) is reported once
    /// through the error hook; recording keeps working either way.
    fn ensure_registered(&self) {
        self.inner.register_once.call_once(|| {
            if let Err(err) = self.inner.registry.register(Box::new(self.clone())) {
                (self.inner.on_error)(&SpanMetricsError::Registration(err.to_string()));
            }
        });
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }
}

impl Collector for SpanCollector {
    fn desc(&self) -> Vec<&Desc> {
        // Histograms appear at runtime; there is no static descriptor set.
        Vec::new()
    }

    fn collect(&self) -> Vec<MetricFamily> {
        // Snapshot the handles first so sample encoding happens with no
        // shard lock held; recording proceeds concurrently with a scrape.
        let histograms: Vec<Histogram> = self
            .inner
            .histograms
            .iter()
            .map(|h| h.value().clone())
            .collect();
        histograms.iter().flat_map(Collector::collect).collect()
    }
}
