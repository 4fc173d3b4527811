//! Pooled policy chain evaluation.
//!
//! Policies are submitted in list order onto tokio tasks, with at most
//! `pool_width` in flight at once. Completions are consumed in the original
//! list order, so the first terminal decision found among
//! contiguous-from-the-start completions wins — a later-positioned policy can
//! never override it, regardless of which worker finishes first. In-flight
//! evaluations past the terminal position are not cancelled; their samples
//! are still recorded (the time was genuinely spent) and their decisions are
//! discarded.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::FuturesOrdered;
use futures_util::StreamExt;

use verdex_core::context::Context;
use verdex_core::decision::Decision;
use verdex_core::error::{Result, VerdexError};

use crate::eval::NO_POLICY_OBJECTED;
use crate::policy::Policy;
use crate::stats::StatsTracker;

/// Evaluates independent policies across a bounded worker pool.
pub struct ConcurrentEvaluator {
    stats: Arc<StatsTracker>,
    pool_width: usize,
}

impl ConcurrentEvaluator {
    pub fn new(stats: Arc<StatsTracker>, pool_width: usize) -> Self {
        Self {
            stats,
            pool_width: pool_width.max(1),
        }
    }

    pub async fn evaluate(
        &self,
        ctx: &Context,
        policies: &[Arc<dyn Policy + 'static>],
    ) -> Result<Decision> {
        let ctx = Arc::new(ctx.clone());
        let stats = Arc::clone(&self.stats);

        // Drive a bounded, order-preserving set of in-flight evaluations. At
        // most `pool_width` run concurrently; completions are consumed in the
        // original list order (`FuturesOrdered`), so the first terminal verdict
        // among contiguous-from-the-start completions wins. This is spelled out
        // with an explicit queue rather than `stream::iter(..).map(..).buffered`
        // because the closure-returns-future form trips a higher-ranked-lifetime
        // inference limitation once the whole future is `tokio::spawn`ed.
        let submit = |policy: Arc<dyn Policy + 'static>| -> Pin<
            Box<dyn Future<Output = RunOutcome> + Send>,
        > { Box::pin(run_one(policy, Arc::clone(&ctx), Arc::clone(&stats))) };

        let mut pending = policies.iter().cloned();
        let mut completions = FuturesOrdered::new();
        for _ in 0..self.pool_width {
            match pending.next() {
                Some(policy) => completions.push_back(submit(policy)),
                None => break,
            }
        }

        while let Some((name, joined)) = completions.next().await {
            // Keep the pool full: admit the next policy as a slot frees.
            if let Some(policy) = pending.next() {
                completions.push_back(submit(policy));
            }

            let result = match joined {
                Ok(result) => result,
                // The policy task panicked or was aborted.
                Err(join_err) => {
                    return Err(VerdexError::PolicyFailed {
                        policy: name,
                        source: Box::new(join_err),
                    })
                }
            };

            let decision = result.map_err(|source| VerdexError::PolicyFailed {
                policy: name,
                source,
            })?;

            if decision.is_terminal() {
                tracing::debug!(
                    verdict = decision.verdict.as_str(),
                    "terminal verdict, later completions discarded"
                );
                return Ok(decision);
            }
        }
        Ok(Decision::allow(NO_POLICY_OBJECTED))
    }
}

/// Evaluate a single policy on a spawned task, recording its latency sample.
///
/// Factored out of [`ConcurrentEvaluator::evaluate`] as a named `async fn` so
/// the streaming `.map` adapter receives an ordinary function call rather than
/// an inline `async move` block; the latter trips a higher-ranked-lifetime
/// inference limitation when the resulting future is later `tokio::spawn`ed.
type RunOutcome = (
    String,
    std::result::Result<
        std::result::Result<Decision, verdex_core::error::PolicyError>,
        tokio::task::JoinError,
    >,
);

async fn run_one(
    policy: Arc<dyn Policy + 'static>,
    ctx: Arc<Context>,
    stats: Arc<StatsTracker>,
) -> RunOutcome {
    let name = policy.name().to_string();
    // Spawned so the evaluation keeps running (and records its sample) even if
    // the chain resolves before it completes.
    let handle = tokio::spawn(async move {
        let started = Instant::now();
        let result = policy.evaluate(&ctx).await;
        stats.record_sample(policy.name(), started.elapsed());
        result
    });
    (name, handle.await)
}
