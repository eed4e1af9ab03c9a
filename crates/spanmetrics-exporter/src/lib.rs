//! spanmetrics exporter library entry.
//!
//! This crate wires the naming rules from `spanmetrics-core` to a lazily
//! populated histogram registry and registers that registry as a collector
//! with a Prometheus `Registry`. It is intended to be handed completed
//! spans by a tracing pipeline and scraped through the registry it
//! exposes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod collector;
pub mod config;
pub mod exporter;

pub use collector::{SpanCollector, DURATION_BUCKETS_MS};
pub use config::ExporterConfig;
pub use exporter::{ErrorHook, ExporterOptions, SpanExporter};
