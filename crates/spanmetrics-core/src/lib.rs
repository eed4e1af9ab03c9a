//! spanmetrics core: span records, naming rules, and the error surface.
//!
//! This crate defines the contracts shared by the exporter and by the
//! tracing pipelines that feed it spans. It intentionally carries no
//! backend or runtime dependencies so the naming grammar can be reused and
//! tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Span recording sits inside a tracing pipeline that must never be taken
//! down by a malformed span, so all fallible paths surface as
//! `SpanMetricsError`/`Result` or clamp to a safe value.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod name;
pub mod span;

/// Shared result type.
pub use error::{Result, SpanMetricsError};
pub use span::SpanRecord;
