//! Canonical key derivation for request contexts.
//!
//! Two structurally equal contexts must produce identical keys regardless of
//! how their maps were built or in which order keys were inserted, and
//! structurally distinct contexts must produce distinct keys with
//! overwhelming probability. The derivation is a pure function of the
//! context value: no hidden state, no randomness.
//!
//! The pipeline is RFC 8785 (JSON Canonicalization Scheme) serialization —
//! object keys sorted, compact separators, deterministic number formatting —
//! followed by a blake3 digest of the canonical bytes. JSON syntax already
//! distinguishes scalar types, so the number `1`, the string `"1"`, and the
//! boolean `true` cannot collide. Sequence order is semantically meaningful
//! and is preserved as-is.

use std::fmt;

use crate::context::Context;
use crate::error::{Result, VerdexError};

/// Order-independent, type-distinguishing cache key for a context.
///
/// Holds the 32-byte blake3 digest of the canonical JSON form. Cheap to
/// clone and hash, which is what the decision cache wants from its keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalKey([u8; 32]);

impl CanonicalKey {
    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// Serialize a context in JCS-canonical form.
///
/// Fails with `UnsupportedValue` for values JCS cannot express
/// deterministically (non-finite floats in particular).
pub fn canonical_json(ctx: &Context) -> Result<String> {
    serde_jcs::to_string(ctx).map_err(|e| {
        tracing::debug!(error = %e, "context rejected by canonicalizer");
        VerdexError::UnsupportedValue(e.to_string())
    })
}

/// Derive the canonical key for a context.
pub fn canonicalize(ctx: &Context) -> Result<CanonicalKey> {
    let json = canonical_json(ctx)?;
    Ok(CanonicalKey(*blake3::hash(json.as_bytes()).as_bytes()))
}
