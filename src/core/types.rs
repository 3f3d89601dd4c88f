/*!
 * Core Types
 * Common types used across the pool
 */

/// Size type for byte lengths and capacities
pub type Size = usize;

/// Zero-based ordinal of a size class, ordered by increasing capacity
pub type ClassIndex = usize;

/// Common result type for fallible pool setup
pub type PoolResult<T> = Result<T, super::errors::PoolError>;
