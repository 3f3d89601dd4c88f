/*!
 * Bytes Memory Pool
 *
 * Tiered, size-classed pool of reusable byte buffers for workloads that
 * repeatedly need variable-length scratch space (serialization, I/O staging).
 *
 * ```
 * use bytes_memory_pool::BufferPool;
 *
 * let pool = BufferPool::new();
 * let mut buf = pool.acquire(100);
 * assert_eq!(buf.capacity(), 128);
 * buf.extend_from_slice(b"payload");
 * pool.release(buf);
 * ```
 */

pub mod core;
pub mod monitoring;
pub mod pool;

// Re-exports
pub use crate::core::errors::PoolError;
pub use crate::core::types::{ClassIndex, PoolResult, Size};
pub use monitoring::init_tracing;
pub use pool::{
    default_pool, init_default_pool, rounded_empty_buffer, BucketStats, BufferPool, PoolConfig,
    PoolStats, PooledBuffer,
};
