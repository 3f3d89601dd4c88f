/*!
 * Pool Configuration
 *
 * Retention policy for pooled buffers. Without a garbage collector nothing
 * shrinks the free stores behind the caller's back, so buffers stay
 * retained until `BufferPool::evict_all` or the pool is dropped. A retain
 * limit bounds that footprint per class.
 */

use crate::core::errors::PoolError;
use crate::core::limits::ENV_RETAIN_LIMIT;
use crate::core::types::PoolResult;
use serde::{Deserialize, Serialize};

/// Pool configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum buffers retained per class; `None` retains without bound
    #[serde(default)]
    pub retain_limit: Option<usize>,
}

impl PoolConfig {
    /// Unbounded retention
    pub const fn unbounded() -> Self {
        Self { retain_limit: None }
    }

    /// Retain at most `limit` buffers per class
    pub const fn with_retain_limit(limit: usize) -> Self {
        Self {
            retain_limit: Some(limit),
        }
    }

    /// Read configuration from the environment
    ///
    /// Environment variables:
    /// - BUFPOOL_RETAIN_LIMIT: per-class retention cap (default: unbounded)
    pub fn from_env() -> PoolResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> PoolResult<Self> {
        let retain_limit = match lookup(ENV_RETAIN_LIMIT) {
            None => None,
            Some(raw) => {
                let limit = raw.trim().parse::<usize>().map_err(|_| PoolError::InvalidEnv {
                    var: ENV_RETAIN_LIMIT.to_string(),
                    value: raw.clone(),
                })?;
                Some(limit)
            }
        };

        let config = Self { retain_limit };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PoolResult<()> {
        if self.retain_limit == Some(0) {
            return Err(PoolError::InvalidConfig(
                "retain_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
