/*!
 * Process-wide Default Pool
 *
 * Nothing is constructed implicitly: callers opt in with
 * `init_default_pool`, which is idempotent and safe under concurrent first
 * use. Components that want isolation construct their own `BufferPool`.
 */

use super::BufferPool;
use std::sync::OnceLock;
use tracing::info;

static DEFAULT_POOL: OnceLock<BufferPool> = OnceLock::new();

/// Initialize (once) and return the process-wide pool
pub fn init_default_pool() -> &'static BufferPool {
    DEFAULT_POOL.get_or_init(|| {
        info!("Default buffer pool initialized");
        BufferPool::new()
    })
}

/// The process-wide pool, if `init_default_pool` has run
pub fn default_pool() -> Option<&'static BufferPool> {
    DEFAULT_POOL.get()
}
