use serde::Deserialize;
use verdex_core::error::{Result, VerdexError};

/// Runtime construction options. Fixed for the lifetime of the instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeOptions {
    /// If false, `evaluate` always runs the full policy chain and never
    /// reads or writes the decision cache.
    #[serde(default = "default_enable_cache")]
    pub enable_cache: bool,

    /// If false, `evaluate` always uses the sequential evaluator.
    #[serde(default = "default_enable_parallel")]
    pub enable_parallel: bool,

    /// Maximum LRU entries in the decision cache.
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Worker count for the concurrent evaluator.
    #[serde(default = "default_worker_pool_size")]
    pub worker_pool_size: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            enable_cache: default_enable_cache(),
            enable_parallel: default_enable_parallel(),
            cache_size: default_cache_size(),
            worker_pool_size: default_worker_pool_size(),
        }
    }
}

impl RuntimeOptions {
    pub fn validate(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(VerdexError::InvalidConfig(
                "cache_size must be greater than 0".into(),
            ));
        }
        if self.worker_pool_size == 0 {
            return Err(VerdexError::InvalidConfig(
                "worker_pool_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_enable_cache() -> bool {
    true
}
fn default_enable_parallel() -> bool {
    true
}
fn default_cache_size() -> usize {
    128
}
fn default_worker_pool_size() -> usize {
    4
}
