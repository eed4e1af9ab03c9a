//! Completed span records as handed over by a tracing pipeline.

use std::time::SystemTime;

/// A completed span: operation name plus start/end timestamps.
///
/// Timestamps are optional so that malformed spans (a tracer that never
/// stamped one end) still record as zero-duration observations instead of
/// failing the pipeline that produced them.
#[derive(Debug, Clone)]
pub struct SpanRecord {
    /// Operation name, free-form.
    pub name: String,
    /// When the operation started.
    pub start_time: Option<SystemTime>,
    /// When the operation finished.
    pub end_time: Option<SystemTime>,
}

impl SpanRecord {
    pub fn new(name: impl Into<String>, start_time: SystemTime, end_time: SystemTime) -> Self {
        Self {
            name: name.into(),
            start_time: Some(start_time),
            end_time: Some(end_time),
        }
    }

    /// Span duration truncated to whole milliseconds.
    ///
    /// A missing timestamp or an end before the start (clock skew) clamps
    /// to 0; histograms only take non-negative observations.
    pub fn duration_millis(&self) -> u64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end
                .duration_since(start)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            _ => 0,
        }
    }
}
