/*!
 * Fragment Decomposition Tests
 * Release splits capacities into power-of-two fragments
 */

use bytes::BytesMut;
use bytes_memory_pool::core::limits::{CLASS_COUNT, MAX_CLASS_CAPACITY, TOP_CLASS};
use bytes_memory_pool::pool::capacity_of;
use bytes_memory_pool::BufferPool;
use pretty_assertions::assert_eq;

fn donations(pool: &BufferPool) -> Vec<i32> {
    (0..CLASS_COUNT)
        .map(|i| pool.donation_count(i).unwrap())
        .collect()
}

fn with_bumps(bumps: &[(usize, i32)]) -> Vec<i32> {
    let mut counts = vec![0; CLASS_COUNT];
    for &(idx, n) in bumps {
        counts[idx] = n;
    }
    counts
}

/// Bytes absorbed by the buckets, rebuilt from the donation counters
fn absorbed(pool: &BufferPool) -> usize {
    donations(pool)
        .iter()
        .enumerate()
        .map(|(i, &n)| n as usize * capacity_of(i))
        .sum()
}

#[test]
fn test_release_500() {
    let pool = BufferPool::new();
    pool.release(BytesMut::with_capacity(500));
    assert_eq!(donations(&pool), with_bumps(&[(0, 1), (1, 1), (2, 1)]));
}

#[test]
fn test_release_two_max_chunks() {
    let pool = BufferPool::new();
    pool.release(BytesMut::with_capacity(1 << 27));
    assert_eq!(donations(&pool), with_bumps(&[(TOP_CLASS, 2)]));
}

#[test]
fn test_release_overflow_plus_low_bits() {
    let pool = BufferPool::new();
    pool.release(BytesMut::with_capacity(1000 + (1 << 28)));
    assert_eq!(
        donations(&pool),
        with_bumps(&[(0, 1), (1, 1), (2, 1), (3, 1), (TOP_CLASS, 4)])
    );
}

#[test]
fn test_release_every_class_once() {
    let pool = BufferPool::new();
    // 64 + 128 + ... + 32MiB, all in-range bits set
    let capacity = MAX_CLASS_CAPACITY - 64;
    pool.release(BytesMut::with_capacity(capacity));

    let mut expected = vec![1; CLASS_COUNT];
    expected[TOP_CLASS] = 0;
    assert_eq!(donations(&pool), expected);
    assert_eq!(absorbed(&pool), capacity);
}

#[test]
fn test_fragments_are_exact_and_disjoint() {
    let pool = BufferPool::new();
    let capacity = 64 + 256 + 2048;
    let buf = BytesMut::with_capacity(capacity);
    let base = buf.as_ptr() as usize;
    pool.release(buf);

    let mut spans: Vec<(usize, usize)> = [64, 256, 2048]
        .iter()
        .map(|&len| {
            let frag = pool.acquire(len);
            assert_eq!(frag.capacity(), len);
            (frag.as_ptr() as usize - base, len)
        })
        .collect();
    spans.sort_unstable();

    let mut end = 0;
    for (start, len) in spans {
        assert_eq!(start, end, "fragments overlap or leave a gap");
        end = start + len;
    }
    assert_eq!(end, capacity);
}

#[test]
fn test_sub_minimum_tail_is_discarded() {
    let pool = BufferPool::new();
    pool.release(BytesMut::with_capacity(64 + 63));
    assert_eq!(donations(&pool), with_bumps(&[(0, 1)]));
    assert_eq!(absorbed(&pool), 64);
}

#[test]
fn test_redirect_remainder_is_redistributed() {
    let pool = BufferPool::new();
    pool.release(BytesMut::with_capacity(1 << 16)); // class 10

    let buf = pool.acquire(1000);
    assert_eq!(buf.capacity(), 1024);

    // 64KiB - 1KiB leaves one fragment in each class 4..=9
    let expected = with_bumps(&[(4, 1), (5, 1), (6, 1), (7, 1), (8, 1), (9, 1)]);
    assert_eq!(donations(&pool), expected);
    assert_eq!(absorbed(&pool) + buf.capacity(), 1 << 16);
}
