//! Top-level facade crate for spanmetrics.
//!
//! Re-exports the core contracts and the exporter so users can depend on a single crate.

pub mod core {
    pub use spanmetrics_core::*;
}

pub mod exporter {
    pub use spanmetrics_exporter::*;
}
