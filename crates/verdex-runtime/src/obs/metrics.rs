//! Runtime counters and the metrics snapshot.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::stats::PolicyStat;

/// Shared mutable counters maintained by the runtime facade.
#[derive(Default)]
pub struct RuntimeCounters {
    evaluations: AtomicU64,
    full_evals: AtomicU64,
    full_eval_micros: AtomicU64,
    effective_micros: AtomicU64,
}

impl RuntimeCounters {
    /// Count one `evaluate` call.
    pub fn inc_evaluations(&self) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the latency of a full (non-cached) chain evaluation.
    pub fn observe_full_eval(&self, elapsed: Duration) {
        self.full_evals.fetch_add(1, Ordering::Relaxed);
        self.full_eval_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record the effective latency of any `evaluate` call, cache hits included.
    pub fn observe_effective(&self, elapsed: Duration) {
        self.effective_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
        self.full_evals.store(0, Ordering::Relaxed);
        self.full_eval_micros.store(0, Ordering::Relaxed);
        self.effective_micros.store(0, Ordering::Relaxed);
    }

    /// Estimated speedup: mean full-evaluation latency over mean effective
    /// latency. Informational only — reported, never relied upon.
    pub fn estimated_speedup(&self) -> f64 {
        let evals = self.evaluations.load(Ordering::Relaxed);
        let full = self.full_evals.load(Ordering::Relaxed);
        if evals == 0 || full == 0 {
            return 1.0;
        }
        let avg_full = self.full_eval_micros.load(Ordering::Relaxed) as f64 / full as f64;
        let avg_effective = self.effective_micros.load(Ordering::Relaxed) as f64 / evals as f64;
        if avg_effective <= 0.0 {
            return 1.0;
        }
        (avg_full / avg_effective).max(1.0)
    }
}

/// Point-in-time snapshot of the runtime's observable state.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeMetrics {
    pub evaluations: u64,
    pub cache_hits: u64,
    /// Fraction of `evaluate` calls resolved from the cache, in [0, 1].
    pub cache_hit_rate: f64,
    pub parallel_enabled: bool,
    pub estimated_speedup: f64,
    pub productivity_improvement_pct: f64,
    pub policy_stats: HashMap<String, PolicyStat>,
    pub cache_size: usize,
    pub cache_capacity: usize,
}

impl RuntimeMetrics {
    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# TYPE verdex_evaluations_total counter");
        let _ = writeln!(out, "verdex_evaluations_total {}", self.evaluations);
        let _ = writeln!(out, "# TYPE verdex_cache_hits_total counter");
        let _ = writeln!(out, "verdex_cache_hits_total {}", self.cache_hits);
        let _ = writeln!(out, "# TYPE verdex_cache_hit_rate gauge");
        let _ = writeln!(out, "verdex_cache_hit_rate {}", self.cache_hit_rate);
        let _ = writeln!(out, "# TYPE verdex_cache_entries gauge");
        let _ = writeln!(out, "verdex_cache_entries {}", self.cache_size);
        let _ = writeln!(out, "# TYPE verdex_estimated_speedup gauge");
        let _ = writeln!(out, "verdex_estimated_speedup {}", self.estimated_speedup);

        let _ = writeln!(out, "# TYPE verdex_policy_calls_total counter");
        let mut names: Vec<&String> = self.policy_stats.keys().collect();
        names.sort();
        for name in &names {
            let stat = &self.policy_stats[*name];
            let _ = writeln!(
                out,
                "verdex_policy_calls_total{{policy=\"{}\"}} {}",
                escape_label(name),
                stat.calls
            );
        }
        let _ = writeln!(out, "# TYPE verdex_policy_avg_micros gauge");
        for name in &names {
            let stat = &self.policy_stats[*name];
            let _ = writeln!(
                out,
                "verdex_policy_avg_micros{{policy=\"{}\"}} {}",
                escape_label(name),
                stat.avg_micros
            );
        }
        out
    }
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
