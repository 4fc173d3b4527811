//! The policy contract.
//!
//! A policy is a named evaluation unit: given a context, it returns a
//! decision. It is stateless from the runtime's perspective; any internal
//! state belongs to the policy itself. Concrete policies implement one
//! polymorphic interface and are shared via `Arc<dyn Policy>`.

use async_trait::async_trait;

use verdex_core::context::Context;
use verdex_core::decision::Decision;
use verdex_core::error::PolicyError;

/// A single authorization rule producing a [`Decision`] from a [`Context`].
///
/// A returned `Err` means the policy itself failed; the runtime propagates
/// it wrapped with the policy's name and never converts it into a verdict.
#[async_trait]
pub trait Policy: Send + Sync {
    fn name(&self) -> &str;
    async fn evaluate(&self, ctx: &Context) -> Result<Decision, PolicyError>;
}

/// Adapter wrapping a synchronous closure as a [`Policy`].
pub struct FnPolicy<F> {
    name: String,
    f: F,
}

impl<F> FnPolicy<F>
where
    F: Fn(&Context) -> Result<Decision, PolicyError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

#[async_trait]
impl<F> Policy for FnPolicy<F>
where
    F: Fn(&Context) -> Result<Decision, PolicyError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn evaluate(&self, ctx: &Context) -> Result<Decision, PolicyError> {
        (self.f)(ctx)
    }
}
