/*!
 * Property Tests
 * Rounding and decomposition invariants over arbitrary sizes
 */

use bytes::BytesMut;
use bytes_memory_pool::core::limits::{
    CLASS_COUNT, MAX_CLASS_CAPACITY, MAX_CLASS_EXP, MIN_CLASS_CAPACITY,
};
use bytes_memory_pool::pool::{capacity_of, class_index_for, rounded_capacity};
use bytes_memory_pool::BufferPool;
use proptest::prelude::*;

/// Bytes absorbed by the buckets, rebuilt from the donation counters
fn absorbed(pool: &BufferPool) -> usize {
    (0..CLASS_COUNT)
        .map(|i| pool.donation_count(i).unwrap() as usize * capacity_of(i))
        .sum()
}

/// Expected absorbed bytes: all overflow chunks plus the in-range bits
fn expected_absorbed(capacity: usize) -> usize {
    let overflow = (capacity >> MAX_CLASS_EXP) << MAX_CLASS_EXP;
    let low = capacity & (MAX_CLASS_CAPACITY - 1) & !(MIN_CLASS_CAPACITY - 1);
    overflow + low
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_acquire_capacity_is_class(len in 0usize..=MAX_CLASS_CAPACITY) {
        let cap = rounded_capacity(len);
        prop_assert!(cap >= len);
        prop_assert!(cap.is_power_of_two());
        prop_assert!((MIN_CLASS_CAPACITY..=MAX_CLASS_CAPACITY).contains(&cap));
        // Tightest class: the one below would not fit
        prop_assert!(cap == MIN_CLASS_CAPACITY || cap / 2 < len);
    }

    #[test]
    fn prop_class_index_monotonic(a in 0usize..(1 << 30), b in 0usize..(1 << 30)) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(class_index_for(lo) <= class_index_for(hi));
    }

    #[test]
    fn prop_release_absorbs_all_in_range_bits(capacity in 0usize..(1 << 22)) {
        let pool = BufferPool::new();
        pool.release(BytesMut::with_capacity(capacity));
        prop_assert_eq!(absorbed(&pool), expected_absorbed(capacity));
    }

    #[test]
    fn prop_release_fragments_match_popcount(capacity in 0usize..(1 << 22)) {
        let pool = BufferPool::new();
        pool.release(BytesMut::with_capacity(capacity));
        let fragments: i32 = (0..CLASS_COUNT).map(|i| pool.donation_count(i).unwrap()).sum();
        let in_range = capacity & (MAX_CLASS_CAPACITY - 1) & !(MIN_CLASS_CAPACITY - 1);
        prop_assert_eq!(fragments as u32, in_range.count_ones());
    }

    #[test]
    fn prop_round_trip_keeps_capacity(len in 0usize..(1 << 20)) {
        let pool = BufferPool::new();
        let x = pool.acquire(len);
        let cap = x.capacity();
        pool.release(x);
        prop_assert_eq!(pool.acquire(len).capacity(), cap);
    }
}

#[test]
fn test_absorbs_capacities_at_and_above_top_class() {
    for capacity in [
        MAX_CLASS_CAPACITY,
        MAX_CLASS_CAPACITY + MIN_CLASS_CAPACITY,
        2 * MAX_CLASS_CAPACITY + 4096 + 7,
    ] {
        let pool = BufferPool::new();
        pool.release(BytesMut::with_capacity(capacity));
        assert_eq!(absorbed(&pool), expected_absorbed(capacity));
    }
}
