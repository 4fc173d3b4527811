//! Shared error type across verdex crates.

use thiserror::Error;

/// Host-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCode {
    /// Context contains a value the canonicalizer does not recognize.
    UnsupportedValue,
    /// A policy's own evaluation failed.
    PolicyFailed,
    /// Invalid runtime configuration.
    InvalidConfig,
    /// Internal runtime error.
    Internal,
}

impl HostCode {
    /// String representation used in host responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            HostCode::UnsupportedValue => "UNSUPPORTED_VALUE",
            HostCode::PolicyFailed => "POLICY_FAILED",
            HostCode::InvalidConfig => "INVALID_CONFIG",
            HostCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, VerdexError>;

/// Error a policy may return from its own evaluation. Opaque to the runtime;
/// it is wrapped into [`VerdexError::PolicyFailed`] unchanged.
pub type PolicyError = Box<dyn std::error::Error + Send + Sync>;

/// Unified error type used by core and runtime.
///
/// A policy failure is never converted into a verdict: whether it maps to a
/// fail-open or fail-closed response is the host's decision, not ours.
#[derive(Debug, Error)]
pub enum VerdexError {
    #[error("unsupported context value: {0}")]
    UnsupportedValue(String),
    #[error("policy '{policy}' failed: {source}")]
    PolicyFailed {
        policy: String,
        #[source]
        source: PolicyError,
    },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl VerdexError {
    /// Map internal error to a stable host-facing code.
    pub fn host_code(&self) -> HostCode {
        match self {
            VerdexError::UnsupportedValue(_) => HostCode::UnsupportedValue,
            VerdexError::PolicyFailed { .. } => HostCode::PolicyFailed,
            VerdexError::InvalidConfig(_) => HostCode::InvalidConfig,
            VerdexError::Internal(_) => HostCode::Internal,
        }
    }
}
