//! Exporter integration tests: registry behavior observed through the
//! Prometheus gather path.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

use spanmetrics_core::SpanRecord;
use spanmetrics_exporter::{ExporterOptions, SpanExporter, DURATION_BUCKETS_MS};

fn span(name: &str, millis: u64) -> SpanRecord {
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    SpanRecord::new(name, start, start + Duration::from_millis(millis))
}

#[test]
fn same_name_shares_one_histogram() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    exporter.export_span(&span("checkout", 5));
    exporter.export_span(&span("checkout", 7));

    let families = exporter.registry().gather();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].get_name(), "checkout");
    assert_eq!(families[0].get_metric().len(), 1);

    let h = families[0].get_metric()[0].get_histogram();
    assert_eq!(h.get_sample_count(), 2);
    assert_eq!(h.get_sample_sum(), 12.0);
}

#[test]
fn distinct_names_get_distinct_histograms() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    exporter.export_span(&span("checkout", 5));
    exporter.export_span(&span("refund", 5));

    let names: Vec<String> = exporter
        .registry()
        .gather()
        .iter()
        .map(|f| f.get_name().to_string())
        .collect();
    assert_eq!(names, ["checkout", "refund"]);
}

#[test]
fn path_like_spans_are_dropped() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    exporter.export_span(&span("/users/42", 5));
    assert!(exporter.registry().gather().is_empty());

    exporter.export_span(&span("checkout", 5));
    assert_eq!(exporter.registry().gather().len(), 1);
}

#[test]
fn empty_names_are_dropped() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    exporter.export_span(&span("", 5));
    assert!(exporter.registry().gather().is_empty());
}

#[test]
fn namespace_prefixes_families() {
    let exporter = SpanExporter::new(ExporterOptions {
        namespace: "svc".into(),
        ..Default::default()
    });
    exporter.export_span(&span("GET foo", 5));

    let families = exporter.registry().gather();
    assert_eq!(families.len(), 1);
    assert_eq!(families[0].get_name(), "svc_GET_foo");
}

#[test]
fn buckets_match_documented_bounds() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    exporter.export_span(&span("checkout", 120));

    let families = exporter.registry().gather();
    let h = families[0].get_metric()[0].get_histogram();
    let bounds: Vec<f64> = h.get_bucket().iter().map(|b| b.get_upper_bound()).collect();
    assert_eq!(bounds, DURATION_BUCKETS_MS.to_vec());

    // 120ms lands in the 250ms bucket (cumulative), not the 100ms one.
    let at = |bound: f64| {
        h.get_bucket()
            .iter()
            .find(|b| b.get_upper_bound() == bound)
            .map(|b| b.get_cumulative_count())
            .unwrap()
    };
    assert_eq!(at(100.0), 0);
    assert_eq!(at(250.0), 1);
    assert_eq!(at(120000.0), 1);
}

#[test]
fn sub_millisecond_remainder_is_truncated() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    let start = SystemTime::UNIX_EPOCH;
    exporter.export_span(&SpanRecord::new(
        "checkout",
        start,
        start + Duration::from_micros(1500),
    ));

    let families = exporter.registry().gather();
    let h = families[0].get_metric()[0].get_histogram();
    assert_eq!(h.get_sample_sum(), 1.0);
    assert_eq!(h.get_bucket()[0].get_cumulative_count(), 1);
}

#[test]
fn skewed_span_observes_zero() {
    let exporter = SpanExporter::new(ExporterOptions::default());
    let start = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
    exporter.export_span(&SpanRecord::new("checkout", start, SystemTime::UNIX_EPOCH));

    let families = exporter.registry().gather();
    let h = families[0].get_metric()[0].get_histogram();
    assert_eq!(h.get_sample_count(), 1);
    assert_eq!(h.get_sample_sum(), 0.0);
}

#[test]
fn concurrent_first_observation_creates_one_histogram() {
    let exporter = Arc::new(SpanExporter::new(ExporterOptions::default()));
    let threads = 16;
    let per_thread = 25;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let exporter = Arc::clone(&exporter);
            thread::spawn(move || {
                for _ in 0..per_thread {
                    exporter.export_span(&span("hot_path", 3));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let families = exporter.registry().gather();
    assert_eq!(families.len(), 1);
    let h = families[0].get_metric()[0].get_histogram();
    assert_eq!(h.get_sample_count(), (threads * per_thread) as u64);
}

#[test]
fn duplicate_registration_reports_once_and_recording_continues() {
    let registry = prometheus::Registry::new();
    let fired = Arc::new(AtomicUsize::new(0));

    let first = SpanExporter::new(ExporterOptions {
        registry: Some(registry.clone()),
        ..Default::default()
    });
    let hook_fired = Arc::clone(&fired);
    let second = SpanExporter::new(ExporterOptions {
        registry: Some(registry.clone()),
        on_error: Some(Arc::new(move |_err| {
            hook_fired.fetch_add(1, Ordering::SeqCst);
        })),
        ..Default::default()
    });

    first.export_span(&span("checkout", 5));
    // The second collector collides with the first on the shared registry;
    // the refusal is reported once and recording carries on.
    second.export_span(&span("refund", 5));
    second.export_span(&span("refund", 5));

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    let names: Vec<String> = registry
        .gather()
        .iter()
        .map(|f| f.get_name().to_string())
        .collect();
    assert_eq!(names, ["checkout"]);
}
