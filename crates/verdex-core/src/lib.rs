//! verdex core: decision primitives, error types, and context canonicalization.
//!
//! This crate defines the verdict/decision contracts and the canonical-key
//! derivation shared by the runtime and by host services embedding it. It
//! intentionally carries no async or locking dependencies so it can be reused
//! in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `VerdexError`/`Result` so an embedding
//! service never crashes on a malformed context.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod context;
pub mod decision;
pub mod error;

pub use decision::{Decision, Verdict};
/// Shared result type.
pub use error::{Result, VerdexError};
