/*!
 * Size Class Table
 * Maps requested byte lengths onto power-of-two capacity classes
 *
 * Rounding is a ceiling-log2: the class for `len` is the smallest class whose
 * capacity is at least `max(len, 1)`. Lengths that land above the top class
 * are oversized and never touch a bucket.
 */

use crate::core::limits::{CLASS_COUNT, MAX_CLASS_CAPACITY, MIN_CLASS_CAPACITY, MIN_CLASS_EXP};
use crate::core::types::{ClassIndex, Size};

/// Smallest class index whose capacity is `>= max(len, 1)`
///
/// Unbounded: oversized lengths yield an index `>= CLASS_COUNT`.
#[inline]
pub fn class_index_for(len: Size) -> ClassIndex {
    if len <= MIN_CLASS_CAPACITY {
        return 0;
    }
    let ceil_log2 = Size::BITS - (len - 1).leading_zeros();
    (ceil_log2 - MIN_CLASS_EXP) as ClassIndex
}

/// Capacity of class `index`, i.e. `2^(index + MIN_CLASS_EXP)`
#[inline]
pub const fn capacity_of(index: ClassIndex) -> Size {
    debug_assert!(index < CLASS_COUNT);
    1 << (index as u32 + MIN_CLASS_EXP)
}

/// Class for `len`, or `None` when the request is oversized
#[inline]
pub fn class_for(len: Size) -> Option<ClassIndex> {
    if len > MAX_CLASS_CAPACITY {
        return None;
    }
    Some(class_index_for(len))
}

/// Capacity a request of `len` bytes is served with
///
/// Class capacity for pooled lengths, exactly `len` for oversized ones.
#[inline]
pub fn rounded_capacity(len: Size) -> Size {
    class_for(len).map_or(len, capacity_of)
}
