/*!
 * Buffer Pool
 *
 * Tiered, size-classed pool of reusable `BytesMut` buffers.
 *
 * ## Size Classes
 *
 * 21 power-of-two classes from 64B to 64MiB, both inclusive. A request of
 * `n` bytes is served from the smallest class with capacity `>= n`; requests
 * above 64MiB get a one-off buffer of exactly `n` bytes.
 *
 * ## Acquire
 *
 * Each bucket keeps a donation counter estimating its surplus. Acquire scans
 * from the exact-fit class upward and borrows from the first class showing
 * surplus. A borrowed buffer is split: the front goes to the caller, the
 * remainder is released back and lands in the intermediate classes.
 *
 * ## Release
 *
 * A returned buffer is decomposed along the set bits of its capacity. Every
 * bit between 64B and 32MiB yields one fragment for the matching class; the
 * part at or above 64MiB is cut into top-class chunks. Bits below 64B are
 * discarded. Fragments share the original allocation.
 *
 * ## Retention
 *
 * Buffers are retained until evicted or until the pool is dropped. Use
 * `PoolConfig::retain_limit` or `evict_all` to bound the footprint.
 */

mod bucket;
pub mod config;
pub mod global;
mod guard;
pub mod size_class;
pub mod stats;

pub use config::PoolConfig;
pub use global::{default_pool, init_default_pool};
pub use guard::PooledBuffer;
pub use size_class::{capacity_of, class_for, class_index_for, rounded_capacity};
pub use stats::{BucketStats, PoolStats};

use crate::core::limits::{CLASS_COUNT, MAX_CLASS_CAPACITY, MAX_CLASS_EXP, MIN_CLASS_EXP, TOP_CLASS};
use crate::core::types::{ClassIndex, Size};
use bucket::BufferBucket;
use bytes::BytesMut;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, trace};

/// Size-classed pool of reusable byte buffers
///
/// Safe to share across threads; every operation is synchronous, lock-free,
/// and infallible.
pub struct BufferPool {
    buckets: [BufferBucket; CLASS_COUNT],
    oversized: AtomicUsize,
}

impl BufferPool {
    /// Create an independent pool with unbounded retention
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create an independent pool with a retention policy
    pub fn with_config(config: PoolConfig) -> Self {
        Self {
            buckets: std::array::from_fn(|index| BufferBucket::new(index, config.retain_limit)),
            oversized: AtomicUsize::new(0),
        }
    }

    /// Acquire an empty buffer with capacity `>= len`
    ///
    /// Pooled lengths get exactly their class capacity. Oversized lengths
    /// get a fresh, untracked buffer of exactly `len` bytes.
    pub fn acquire(&self, len: Size) -> BytesMut {
        let Some(idx) = class_for(len) else {
            self.oversized.fetch_add(1, Ordering::Relaxed);
            debug!(len = len, "Allocated oversized buffer outside the pool");
            return BytesMut::with_capacity(len);
        };

        let source = self.surplus_class(idx).unwrap_or(idx);
        if source == idx {
            return self.buckets[idx].acquire();
        }

        let capacity = capacity_of(idx);
        let mut buf = self.buckets[source].acquire();
        let remainder = buf.split_off(capacity);
        debug!(
            class = idx,
            source = source,
            remainder = remainder.capacity(),
            "Redirected acquire to surplus class"
        );
        self.release(remainder);
        buf
    }

    /// Acquire a buffer that returns itself to this pool on drop
    pub fn acquire_pooled(&self, len: Size) -> PooledBuffer<'_> {
        PooledBuffer::new(self, self.acquire(len))
    }

    /// Return a buffer to the pool
    ///
    /// The capacity is split into power-of-two fragments that repopulate
    /// every matching class. `None`, zero-capacity, and sub-64B buffers are
    /// discarded. The caller must not keep any handle to the released
    /// buffer.
    pub fn release(&self, buffer: impl Into<Option<BytesMut>>) {
        let Some(mut rest) = buffer.into() else {
            return;
        };
        rest.clear();
        let capacity = rest.capacity();

        // Everything at or above the top class becomes top-class chunks
        for _ in 0..(capacity >> MAX_CLASS_EXP) {
            let chunk = split_front(&mut rest, MAX_CLASS_CAPACITY);
            trace!(class = TOP_CLASS, "Released overflow chunk");
            self.buckets[TOP_CLASS].release(chunk);
        }

        // Remaining low bits, one fragment per set bit
        let mut bits = (capacity & (MAX_CLASS_CAPACITY - 1)) >> MIN_CLASS_EXP;
        while bits != 0 {
            let idx = bits.trailing_zeros() as ClassIndex;
            let chunk = split_front(&mut rest, capacity_of(idx));
            trace!(class = idx, "Released fragment");
            self.buckets[idx].release(chunk);
            bits &= bits - 1;
        }
        // `rest` now holds the sub-64B tail, which is dropped
    }

    /// Drop every retained buffer in every class
    ///
    /// Returns the number of buffers dropped.
    pub fn evict_all(&self) -> usize {
        let evicted: usize = self.buckets.iter().map(BufferBucket::evict).sum();
        debug!(evicted = evicted, "Evicted pooled buffers");
        evicted
    }

    /// Donation counter of class `index`, or `None` if out of range
    pub fn donation_count(&self, index: ClassIndex) -> Option<i32> {
        self.buckets.get(index).map(BufferBucket::donations)
    }

    /// Snapshot of every class
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            buckets: self.buckets.iter().map(BufferBucket::stats).collect(),
            oversized: self.oversized.load(Ordering::Relaxed),
        }
    }

    /// First class at or above `idx` whose cumulative donations are non-zero
    ///
    /// Ties go to the class closest to `idx`.
    fn surplus_class(&self, idx: ClassIndex) -> Option<ClassIndex> {
        let mut surplus = 0i64;
        for (offset, bucket) in self.buckets[idx..].iter().enumerate() {
            surplus += i64::from(bucket.donations());
            if surplus != 0 {
                return Some(idx + offset);
            }
        }
        None
    }
}

/// Freshly allocated, never-pooled buffer sized like `acquire(len)` would be
pub fn rounded_empty_buffer(len: Size) -> BytesMut {
    BytesMut::with_capacity(rounded_capacity(len))
}

/// Cut the first `len` bytes of capacity off `buf`
///
/// Both halves share the original allocation.
#[inline]
fn split_front(buf: &mut BytesMut, len: Size) -> BytesMut {
    let tail = buf.split_off(len);
    std::mem::replace(buf, tail)
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("buckets", &self.buckets)
            .field("oversized", &self.oversized.load(Ordering::Relaxed))
            .finish()
    }
}
