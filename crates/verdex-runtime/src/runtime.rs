//! Runtime facade composing cache, statistics, evaluators, and optimizer.
//!
//! Construct once, then share via `Arc`. `evaluate` may be called from many
//! tasks concurrently: the cache and statistics go through lock-protected
//! paths, and the policy list is copy-on-write — readers always see either
//! the pre- or post-optimization list in full, never a partially updated one.

use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use verdex_core::context::{self, Context};
use verdex_core::decision::Decision;
use verdex_core::error::Result;

use crate::cache::DecisionCache;
use crate::config::RuntimeOptions;
use crate::eval::{ConcurrentEvaluator, SequentialEvaluator};
use crate::obs::{RuntimeCounters, RuntimeMetrics};
use crate::optimize;
use crate::policy::Policy;
use crate::stats::StatsTracker;

/// The public entry point of the policy-decision runtime.
pub struct VerdexRuntime {
    options: RuntimeOptions,
    policies: RwLock<Arc<Vec<Arc<dyn Policy>>>>,
    cache: Option<Arc<DecisionCache>>,
    stats: Arc<StatsTracker>,
    counters: RuntimeCounters,
    sequential: SequentialEvaluator,
    concurrent: ConcurrentEvaluator,
}

impl VerdexRuntime {
    /// Build a runtime over an ordered policy list.
    /// Returns `InvalidConfig` instead of panicking on bad options.
    pub fn new(policies: Vec<Arc<dyn Policy>>, options: RuntimeOptions) -> Result<Self> {
        options.validate()?;

        let cache = if options.enable_cache {
            Some(Arc::new(DecisionCache::new(options.cache_size)?))
        } else {
            None
        };
        let stats = Arc::new(StatsTracker::new());
        let sequential = SequentialEvaluator::new(Arc::clone(&stats));
        let concurrent = ConcurrentEvaluator::new(Arc::clone(&stats), options.worker_pool_size);

        Ok(Self {
            options,
            policies: RwLock::new(Arc::new(policies)),
            cache,
            stats,
            counters: RuntimeCounters::default(),
            sequential,
            concurrent,
        })
    }

    pub fn with_defaults(policies: Vec<Arc<dyn Policy>>) -> Result<Self> {
        Self::new(policies, RuntimeOptions::default())
    }

    /// Evaluate a context against the current policy order.
    ///
    /// Fails with `UnsupportedValue` if the context cannot be canonicalized
    /// (checked up front, independent of cache configuration) and with
    /// `PolicyFailed` if a policy's own evaluation fails — in which case
    /// nothing is cached for this context.
    pub async fn evaluate(&self, ctx: &Context) -> Result<Decision> {
        let key = context::canonicalize(ctx)?;
        self.counters.inc_evaluations();
        let started = Instant::now();

        if let Some(cache) = &self.cache {
            if let Some(decision) = cache.get(&key) {
                tracing::debug!(
                    key = %key,
                    verdict = decision.verdict.as_str(),
                    "decision cache hit"
                );
                self.counters.observe_effective(started.elapsed());
                return Ok(decision);
            }
        }

        let policies = self.policies_snapshot();
        let decision = if self.options.enable_parallel {
            self.concurrent.evaluate(ctx, &policies).await?
        } else {
            self.sequential.evaluate(ctx, &policies).await?
        };

        if let Some(cache) = &self.cache {
            cache.put(key, decision.clone());
        }

        let elapsed = started.elapsed();
        self.counters.observe_full_eval(elapsed);
        self.counters.observe_effective(elapsed);
        Ok(decision)
    }

    /// Consistent point-in-time metrics snapshot. Never fails.
    pub fn get_metrics(&self) -> RuntimeMetrics {
        let evaluations = self.counters.evaluations();
        let cache_hits = self.cache.as_ref().map(|c| c.hit_count()).unwrap_or(0);
        let cache_hit_rate = if evaluations > 0 {
            cache_hits as f64 / evaluations as f64
        } else {
            0.0
        };
        let estimated_speedup = self.counters.estimated_speedup();

        RuntimeMetrics {
            evaluations,
            cache_hits,
            cache_hit_rate,
            parallel_enabled: self.options.enable_parallel,
            estimated_speedup,
            productivity_improvement_pct: (estimated_speedup - 1.0) * 100.0,
            policy_stats: self.stats.snapshot(),
            cache_size: self.cache.as_ref().map(|c| c.len()).unwrap_or(0),
            cache_capacity: self.cache.as_ref().map(|c| c.capacity()).unwrap_or(0),
        }
    }

    /// Clear cache, statistics, and counters. Policy order is kept.
    pub fn reset_metrics(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
            cache.reset_counters();
        }
        self.stats.reset();
        self.counters.reset();
    }

    /// Re-sort the policy list fastest-first by observed average latency and
    /// swap it in atomically. Clears the cache so every cached decision is
    /// attributable to a single ordering epoch.
    pub fn optimize_order(&self) {
        let snapshot = self.stats.snapshot();
        {
            let mut guard = self.policies.write();
            let next = optimize::reorder(&guard, &snapshot);
            tracing::info!(
                order = ?next.iter().map(|p| p.name()).collect::<Vec<_>>(),
                "policy order optimized"
            );
            *guard = Arc::new(next);
        }
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Current policy order, for audit logging.
    pub fn policy_names(&self) -> Vec<String> {
        self.policies_snapshot()
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    fn policies_snapshot(&self) -> Arc<Vec<Arc<dyn Policy>>> {
        Arc::clone(&self.policies.read())
    }
}
