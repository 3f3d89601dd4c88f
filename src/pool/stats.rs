/*!
 * Pool Statistics
 * Point-in-time snapshots for monitoring
 */

use crate::core::types::{ClassIndex, Size};
use serde::{Deserialize, Serialize};

/// Snapshot of one size class
///
/// Fields are read independently with relaxed loads, so a snapshot taken
/// under concurrent traffic is approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketStats {
    pub index: ClassIndex,
    pub capacity: Size,
    /// Buffers currently retained
    pub available: usize,
    /// Donation counter (surplus estimate)
    pub donations: i32,
    /// Acquires served from the free store
    pub hits: usize,
    /// Acquires that allocated fresh memory
    pub misses: usize,
    /// Buffers stored by release
    pub returns: usize,
    /// Buffers discarded by release (undersized or over the retain limit)
    pub drops: usize,
}

/// Snapshot of a whole pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub buckets: Vec<BucketStats>,
    /// One-off acquires beyond the top class
    pub oversized: usize,
}

impl PoolStats {
    /// Fraction of bucket acquires served without allocating (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let (hits, misses) = self
            .buckets
            .iter()
            .fold((0, 0), |(h, m), b| (h + b.hits, m + b.misses));
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Bytes held in free stores across all classes
    pub fn retained_bytes(&self) -> Size {
        self.buckets.iter().map(|b| b.available * b.capacity).sum()
    }
}
