//! Cost-based policy reordering.

use std::collections::HashMap;
use std::sync::Arc;

use crate::policy::Policy;
use crate::stats::PolicyStat;

/// Produce a new list with the same policies sorted fastest-first by
/// observed average latency.
///
/// Policies with no recorded samples go after all measured ones, in their
/// original relative order: their cost is unknown and must not be assumed
/// fast. The sort is stable, so measured policies with equal averages also
/// keep their original relative order.
pub fn reorder(
    policies: &[Arc<dyn Policy>],
    stats: &HashMap<String, PolicyStat>,
) -> Vec<Arc<dyn Policy>> {
    let mut measured: Vec<(f64, Arc<dyn Policy>)> = Vec::new();
    let mut unmeasured: Vec<Arc<dyn Policy>> = Vec::new();

    for policy in policies {
        match stats.get(policy.name()).filter(|s| s.calls > 0) {
            Some(stat) => measured.push((stat.avg_micros, Arc::clone(policy))),
            None => unmeasured.push(Arc::clone(policy)),
        }
    }

    measured.sort_by(|a, b| a.0.total_cmp(&b.0));

    measured
        .into_iter()
        .map(|(_, p)| p)
        .chain(unmeasured)
        .collect()
}
