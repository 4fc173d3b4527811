//! In-order policy chain evaluation.

use std::sync::Arc;
use std::time::Instant;

use verdex_core::context::Context;
use verdex_core::decision::Decision;
use verdex_core::error::{Result, VerdexError};

use crate::eval::NO_POLICY_OBJECTED;
use crate::policy::Policy;
use crate::stats::StatsTracker;

/// Evaluates policies strictly in list order on the calling task.
///
/// The short-circuit is a correctness property, not just a performance one:
/// a policy placed after a terminal one may assume all earlier terminal
/// conditions did not fire, because it is never executed once one does.
pub struct SequentialEvaluator {
    stats: Arc<StatsTracker>,
}

impl SequentialEvaluator {
    pub fn new(stats: Arc<StatsTracker>) -> Self {
        Self { stats }
    }

    pub async fn evaluate(&self, ctx: &Context, policies: &[Arc<dyn Policy>]) -> Result<Decision> {
        for policy in policies {
            let started = Instant::now();
            let result = policy.evaluate(ctx).await;
            self.stats.record_sample(policy.name(), started.elapsed());

            let decision = result.map_err(|source| VerdexError::PolicyFailed {
                policy: policy.name().to_string(),
                source,
            })?;

            if decision.is_terminal() {
                tracing::debug!(
                    policy = policy.name(),
                    verdict = decision.verdict.as_str(),
                    "terminal verdict, chain stopped"
                );
                return Ok(decision);
            }
        }
        Ok(Decision::allow(NO_POLICY_OBJECTED))
    }
}
