//! Per-policy execution statistics.

use std::collections::HashMap;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;

/// Running aggregate for one policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PolicyStat {
    /// Number of recorded executions.
    pub calls: u64,
    /// Incremental mean execution time in microseconds.
    pub avg_micros: f64,
}

/// Tracks call counts and running-average latency per policy name.
///
/// Entries are created lazily on first sample and never evicted. Each sample
/// is recorded while holding the entry's shard guard, so concurrent workers
/// recording for the same policy cannot lose updates.
#[derive(Default)]
pub struct StatsTracker {
    stats: DashMap<String, PolicyStat>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: DashMap::new(),
        }
    }

    /// Record one execution sample: `avg += (sample - avg) / calls`.
    pub fn record_sample(&self, policy: &str, elapsed: Duration) {
        let micros = elapsed.as_secs_f64() * 1_000_000.0;
        let mut stat = self.stats.entry(policy.to_string()).or_default();
        stat.calls += 1;
        stat.avg_micros += (micros - stat.avg_micros) / stat.calls as f64;
    }

    /// Average latency in microseconds, `None` when no samples recorded.
    pub fn average_micros(&self, policy: &str) -> Option<f64> {
        self.stats
            .get(policy)
            .filter(|s| s.calls > 0)
            .map(|s| s.avg_micros)
    }

    /// Recorded call count for one policy (0 when never sampled).
    pub fn call_count(&self, policy: &str) -> u64 {
        self.stats.get(policy).map(|s| s.calls).unwrap_or(0)
    }

    /// Point-in-time copy of every policy's aggregate.
    pub fn snapshot(&self) -> HashMap<String, PolicyStat> {
        self.stats
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    pub fn reset(&self) {
        self.stats.clear();
    }
}
