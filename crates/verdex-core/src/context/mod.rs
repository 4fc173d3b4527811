//! Request contexts and their canonical representation.
//!
//! A context is an arbitrarily nested tree of maps, sequences, and scalars
//! describing the situation to be judged (actor, action, resource
//! attributes). The runtime never mutates it; it only derives a
//! [`CanonicalKey`] for memoization.

pub mod canonical;

use serde::Serialize;

use crate::error::{Result, VerdexError};

pub use canonical::{canonical_json, canonicalize, CanonicalKey};

/// Caller-supplied request context.
pub type Context = serde_json::Value;

/// Convert any serializable value into a [`Context`].
///
/// Values the context model cannot express (non-string map keys, custom
/// serializers that fail) surface as `UnsupportedValue`.
pub fn from_serialize<T: Serialize>(value: &T) -> Result<Context> {
    serde_json::to_value(value).map_err(|e| VerdexError::UnsupportedValue(e.to_string()))
}
