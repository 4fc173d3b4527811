//! Lightweight in-process metrics.
//!
//! Counters are stored as atomics and snapshotted into [`metrics::RuntimeMetrics`],
//! which can also render itself in Prometheus text exposition format for a
//! host-owned `/metrics` handler.

pub mod metrics;

pub use metrics::{RuntimeCounters, RuntimeMetrics};
