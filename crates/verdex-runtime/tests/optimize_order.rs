//! Runtime-level order optimization.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use verdex_core::context::Context;
use verdex_core::decision::Decision;
use verdex_core::error::PolicyError;
use verdex_runtime::{Policy, RuntimeOptions, VerdexRuntime};

struct SleepPolicy {
    name: String,
    delay: Duration,
    decision: Decision,
}

#[async_trait]
impl Policy for SleepPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    async fn evaluate(&self, _ctx: &Context) -> Result<Decision, PolicyError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.decision.clone())
    }
}

fn sleeping(name: &str, delay: Duration, decision: Decision) -> Arc<dyn Policy> {
    Arc::new(SleepPolicy {
        name: name.into(),
        delay,
        decision,
    })
}

#[tokio::test]
async fn reorders_fastest_first_and_clears_the_cache() {
    // p1 is slow, p2 is fast and terminal, p3 never runs (unmeasured).
    let opts = RuntimeOptions {
        enable_parallel: false,
        ..RuntimeOptions::default()
    };
    let runtime = VerdexRuntime::new(
        vec![
            sleeping("p1", Duration::from_millis(5), Decision::allow("p1: ok")),
            sleeping("p2", Duration::from_millis(1), Decision::deny("p2: denied")),
            sleeping("p3", Duration::from_millis(1), Decision::allow("p3: ok")),
        ],
        opts,
    )
    .unwrap();

    let ctx = json!({"actor": "alice"});
    runtime.evaluate(&ctx).await.unwrap();
    assert_eq!(runtime.get_metrics().cache_size, 1);

    runtime.optimize_order();

    assert_eq!(runtime.policy_names(), ["p2", "p1", "p3"]);

    // Cache was cleared on reorder: the previously cached context misses.
    let metrics = runtime.get_metrics();
    assert_eq!(metrics.cache_size, 0);
    runtime.evaluate(&ctx).await.unwrap();
    assert_eq!(runtime.get_metrics().cache_hits, 0);
}

#[tokio::test]
async fn optimize_without_samples_keeps_original_order() {
    let runtime = VerdexRuntime::with_defaults(vec![
        sleeping("a", Duration::ZERO, Decision::allow("a: ok")),
        sleeping("b", Duration::ZERO, Decision::allow("b: ok")),
        sleeping("c", Duration::ZERO, Decision::allow("c: ok")),
    ])
    .unwrap();

    runtime.optimize_order();
    assert_eq!(runtime.policy_names(), ["a", "b", "c"]);
}

#[tokio::test]
async fn evaluation_keeps_working_across_reorders() {
    let opts = RuntimeOptions {
        enable_parallel: false,
        ..RuntimeOptions::default()
    };
    let runtime = VerdexRuntime::new(
        vec![
            sleeping("slow", Duration::from_millis(3), Decision::allow("slow: ok")),
            sleeping("fast", Duration::from_micros(100), Decision::allow("fast: ok")),
        ],
        opts,
    )
    .unwrap();

    let ctx = json!({"actor": "bob"});
    let before = runtime.evaluate(&ctx).await.unwrap();
    runtime.optimize_order();
    let after = runtime.evaluate(&ctx).await.unwrap();

    // Short-circuit is content-determined: the verdict does not change with
    // the ordering of non-terminal policies.
    assert_eq!(before, after);
    assert_eq!(runtime.policy_names(), ["fast", "slow"]);
}
