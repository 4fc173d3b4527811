//! Runtime options loader (strict parsing).

pub mod schema;

use std::fs;

use verdex_core::error::{Result, VerdexError};

pub use schema::RuntimeOptions;

pub fn load_from_file(path: &str) -> Result<RuntimeOptions> {
    let s = fs::read_to_string(path)
        .map_err(|e| VerdexError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RuntimeOptions> {
    let opts: RuntimeOptions = serde_yaml::from_str(s)
        .map_err(|e| VerdexError::InvalidConfig(format!("invalid yaml: {e}")))?;
    opts.validate()?;
    Ok(opts)
}
