/*!
 * Buffer Bucket
 * Free store for one size class plus its donation counter
 */

use super::size_class::capacity_of;
use super::stats::BucketStats;
use crate::core::types::{ClassIndex, Size};
use bytes::BytesMut;
use crossbeam_queue::SegQueue;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use tracing::debug;

/// One size class of the pool
///
/// Every buffer in `free` has capacity exactly `capacity` and length 0.
///
/// # Performance
///
/// - Lock-free push/pop via `SegQueue`
/// - Counters are relaxed atomics and are not linearized with the queue;
///   `donations` is a heuristic and may briefly disagree with `free`
pub(super) struct BufferBucket {
    index: ClassIndex,
    capacity: Size,
    free: SegQueue<BytesMut>,
    /// Estimated surplus stock, used to redirect acquires
    donations: AtomicI32,
    /// Buffers retained beyond this are dropped on release
    retain_limit: Option<usize>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

impl BufferBucket {
    pub fn new(index: ClassIndex, retain_limit: Option<usize>) -> Self {
        Self {
            index,
            capacity: capacity_of(index),
            free: SegQueue::new(),
            donations: AtomicI32::new(0),
            retain_limit,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn capacity(&self) -> Size {
        self.capacity
    }

    #[inline]
    pub fn donations(&self) -> i32 {
        self.donations.load(Ordering::Relaxed)
    }

    /// Overwrite the donation counter, leaving the free store untouched
    #[cfg(test)]
    pub fn set_donations(&self, n: i32) {
        self.donations.store(n, Ordering::Relaxed);
    }

    /// Approximate number of retained buffers
    #[inline]
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Pop a retained buffer or allocate a fresh one of this class
    pub fn acquire(&self) -> BytesMut {
        if let Some(buf) = self.free.pop() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            // A successful pop consumes surplus; saturate at zero
            let _ = self
                .donations
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                    (n > 0).then(|| n - 1)
                });
            return buf;
        }

        // A cold bucket cannot be in surplus
        self.donations.store(0, Ordering::Relaxed);
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(
            class = self.index,
            capacity = self.capacity,
            "Allocated new buffer"
        );
        BytesMut::with_capacity(self.capacity)
    }

    /// Store `buf` trimmed to exactly this class's capacity
    ///
    /// Buffers smaller than the class, or arriving while the bucket already
    /// retains `retain_limit` buffers, are dropped without being counted.
    pub fn release(&self, mut buf: BytesMut) {
        if buf.capacity() < self.capacity {
            self.drops.fetch_add(1, Ordering::Relaxed);
            return;
        }
        if let Some(limit) = self.retain_limit {
            if self.free.len() >= limit {
                self.drops.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }

        buf.clear();
        if buf.capacity() > self.capacity {
            drop(buf.split_off(self.capacity));
        }

        self.free.push(buf);
        self.returns.fetch_add(1, Ordering::Relaxed);
        self.donations.fetch_add(1, Ordering::Relaxed);
    }

    /// Drop every retained buffer, returning how many were dropped
    pub fn evict(&self) -> usize {
        let mut evicted = 0;
        while self.free.pop().is_some() {
            evicted += 1;
        }
        self.donations.store(0, Ordering::Relaxed);
        evicted
    }

    pub fn stats(&self) -> BucketStats {
        BucketStats {
            index: self.index,
            capacity: self.capacity(),
            available: self.available(),
            donations: self.donations(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for BufferBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferBucket")
            .field("index", &self.index)
            .field("capacity", &self.capacity())
            .field("available", &self.available())
            .field("donations", &self.donations())
            .finish()
    }
}
