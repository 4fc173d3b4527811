//! Verdicts and decisions produced by policy evaluation.

use serde::{Deserialize, Serialize};

/// Outcome class of a single policy evaluation.
///
/// `Deny` and `Escalate` are terminal: evaluation stops at the first policy
/// returning one of them. `Allow` is non-terminal and evaluation continues
/// to the next policy in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Allow,
    Deny,
    Escalate,
}

impl Verdict {
    /// Whether this verdict stops further policy evaluation.
    pub fn is_terminal(self) -> bool {
        matches!(self, Verdict::Deny | Verdict::Escalate)
    }

    /// String representation used in logs and host responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Allow => "ALLOW",
            Verdict::Deny => "DENY",
            Verdict::Escalate => "ESCALATE",
        }
    }
}

/// A resolved verdict with a human-readable origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    /// Origin of the verdict, typically `"<policy name>: <rationale>"`.
    pub reason: String,
}

impl Decision {
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Allow,
            reason: reason.into(),
        }
    }

    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Deny,
            reason: reason.into(),
        }
    }

    pub fn escalate(reason: impl Into<String>) -> Self {
        Self {
            verdict: Verdict::Escalate,
            reason: reason.into(),
        }
    }

    /// Whether this decision stops further policy evaluation.
    pub fn is_terminal(&self) -> bool {
        self.verdict.is_terminal()
    }
}
