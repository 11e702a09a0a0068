//! Lightweight in-process metrics.
//!
//! Counters and histograms are atomics keyed by label sets in a `DashMap`,
//! rendered as Prometheus text by the `/metrics` handler.

pub mod metrics;

pub use metrics::{AdmissionMetrics, Outcome};
