//! Sequential/concurrent equivalence over randomized policy lists.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use verdex_core::decision::Decision;
use verdex_runtime::{FnPolicy, Policy, RuntimeOptions, VerdexRuntime};

fn fixed(name: String, decision: Decision) -> Arc<dyn Policy> {
    Arc::new(FnPolicy::new(name, move |_| Ok(decision.clone())))
}

/// For any fixed policy list and context, the verdict must not depend on the
/// evaluator. Covers empty lists, all-allow lists, and lists with terminal
/// verdicts at arbitrary positions.
#[tokio::test]
async fn sequential_and_concurrent_agree_on_randomized_lists() {
    let mut rng = StdRng::seed_from_u64(7);

    for case in 0..100u32 {
        // case 0 forces the empty list, case 1 forces all-allow.
        let len = if case == 0 { 0 } else { rng.gen_range(1..=6) };
        let mut policies: Vec<Arc<dyn Policy>> = Vec::with_capacity(len);
        for i in 0..len {
            let name = format!("p{case}-{i}");
            let decision = if case == 1 {
                Decision::allow(format!("{name}: ok"))
            } else {
                match rng.gen_range(0..4u8) {
                    0 => Decision::deny(format!("{name}: denied")),
                    1 => Decision::escalate(format!("{name}: escalated")),
                    _ => Decision::allow(format!("{name}: ok")),
                }
            };
            policies.push(fixed(name, decision));
        }

        let pool = rng.gen_range(1..=4);
        let ctx = json!({"case": case});

        let seq = VerdexRuntime::new(
            policies.clone(),
            RuntimeOptions {
                enable_parallel: false,
                ..RuntimeOptions::default()
            },
        )
        .unwrap();
        let conc = VerdexRuntime::new(
            policies,
            RuntimeOptions {
                worker_pool_size: pool,
                ..RuntimeOptions::default()
            },
        )
        .unwrap();

        let expected = seq.evaluate(&ctx).await.unwrap();
        let actual = conc.evaluate(&ctx).await.unwrap();

        assert_eq!(
            expected.verdict, actual.verdict,
            "case {case}: verdict diverged (pool={pool})"
        );
        assert_eq!(expected.reason, actual.reason, "case {case}: reason diverged");
    }
}
