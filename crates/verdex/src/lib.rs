//! Top-level facade crate for verdex.
//!
//! Re-exports core types and the runtime library so users can depend on a single crate.

pub mod core {
    pub use verdex_core::*;
}

pub mod runtime {
    pub use verdex_runtime::*;
}
