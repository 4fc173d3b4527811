//! Cache behavior of the runtime facade.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use serde_json::json;

use verdex_core::decision::Decision;
use verdex_runtime::{FnPolicy, Policy, RuntimeOptions, VerdexRuntime};

fn allow_policy(name: &str) -> Arc<dyn Policy> {
    let reason = format!("{name}: ok");
    Arc::new(FnPolicy::new(name, move |_| Ok(Decision::allow(reason.clone()))))
}

fn sequential_opts() -> RuntimeOptions {
    RuntimeOptions {
        enable_parallel: false,
        ..RuntimeOptions::default()
    }
}

#[tokio::test]
async fn second_evaluation_is_served_from_cache() {
    let runtime = VerdexRuntime::new(
        vec![allow_policy("auth"), allow_policy("quota")],
        sequential_opts(),
    )
    .unwrap();
    let ctx = json!({"actor": "alice", "action": "read"});

    let first = runtime.evaluate(&ctx).await.unwrap();
    let second = runtime.evaluate(&ctx).await.unwrap();
    assert_eq!(first, second);

    let metrics = runtime.get_metrics();
    assert_eq!(metrics.evaluations, 2);
    assert_eq!(metrics.cache_hits, 1);
    // The cached call must not re-run any policy.
    assert_eq!(metrics.policy_stats["auth"].calls, 1);
    assert_eq!(metrics.policy_stats["quota"].calls, 1);
}

#[tokio::test]
async fn key_insertion_order_hits_the_same_entry() {
    let runtime =
        VerdexRuntime::new(vec![allow_policy("auth")], sequential_opts()).unwrap();

    let a: serde_json::Value =
        serde_json::from_str(r#"{"actor":"alice","action":"read"}"#).unwrap();
    let b: serde_json::Value =
        serde_json::from_str(r#"{"action":"read","actor":"alice"}"#).unwrap();

    runtime.evaluate(&a).await.unwrap();
    runtime.evaluate(&b).await.unwrap();

    let metrics = runtime.get_metrics();
    assert_eq!(metrics.cache_hits, 1);
    assert_eq!(metrics.cache_size, 1);
}

#[tokio::test]
async fn disabled_cache_always_runs_the_chain() {
    let opts = RuntimeOptions {
        enable_cache: false,
        enable_parallel: false,
        ..RuntimeOptions::default()
    };
    let runtime = VerdexRuntime::new(vec![allow_policy("auth")], opts).unwrap();
    let ctx = json!({"actor": "alice"});

    runtime.evaluate(&ctx).await.unwrap();
    runtime.evaluate(&ctx).await.unwrap();

    let metrics = runtime.get_metrics();
    assert_eq!(metrics.cache_hits, 0);
    assert_eq!(metrics.cache_capacity, 0);
    assert_eq!(metrics.policy_stats["auth"].calls, 2);
}

#[tokio::test]
async fn failing_policy_propagates_and_caches_nothing() {
    let failing: Arc<dyn Policy> =
        Arc::new(FnPolicy::new("flaky", |_| Err("backend unreachable".into())));
    let runtime = VerdexRuntime::new(vec![failing], sequential_opts()).unwrap();
    let ctx = json!({"actor": "alice"});

    let err = runtime.evaluate(&ctx).await.expect_err("must fail");
    assert_eq!(err.host_code().as_str(), "POLICY_FAILED");
    assert!(err.to_string().contains("flaky"));

    // No partial decision was cached: the retry runs the policy again.
    let _ = runtime.evaluate(&ctx).await.expect_err("must fail again");
    let metrics = runtime.get_metrics();
    assert_eq!(metrics.cache_size, 0);
    assert_eq!(metrics.cache_hits, 0);
    assert_eq!(metrics.policy_stats["flaky"].calls, 2);
}

#[tokio::test]
async fn reset_metrics_clears_cache_and_stats_but_not_order() {
    let runtime = VerdexRuntime::new(
        vec![allow_policy("auth"), allow_policy("quota")],
        sequential_opts(),
    )
    .unwrap();
    let ctx = json!({"actor": "alice"});

    runtime.evaluate(&ctx).await.unwrap();
    runtime.evaluate(&ctx).await.unwrap();
    runtime.reset_metrics();

    let metrics = runtime.get_metrics();
    assert_eq!(metrics.evaluations, 0);
    assert_eq!(metrics.cache_hits, 0);
    assert_eq!(metrics.cache_size, 0);
    assert!(metrics.policy_stats.is_empty());
    assert_eq!(runtime.policy_names(), ["auth", "quota"]);
}

#[tokio::test]
async fn empty_policy_list_allows() {
    let runtime = VerdexRuntime::with_defaults(vec![]).unwrap();
    let decision = runtime.evaluate(&json!({"actor": "alice"})).await.unwrap();
    assert_eq!(decision, Decision::allow("no policy objected"));
}
