//! Policy chain evaluation.
//!
//! Both evaluators walk the configured policy list and stop at the first
//! terminal verdict (DENY or ESCALATE). The concurrent evaluator is purely a
//! latency optimization: for any context and policy list it must produce the
//! same verdict the sequential evaluator would.

pub mod concurrent;
pub mod sequential;

pub use concurrent::ConcurrentEvaluator;
pub use sequential::SequentialEvaluator;

/// Reason attached when every policy allowed (or the list was empty).
pub const NO_POLICY_OBJECTED: &str = "no policy objected";
