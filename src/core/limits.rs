/*!
 * Pool Limits and Constants
 *
 * Centralized location for the size-class geometry and environment knobs.
 *
 * ## Layout
 * - Class `i` holds buffers of exactly `2^(i + MIN_CLASS_EXP)` bytes
 * - The top class is inclusive: `2^MAX_CLASS_EXP` is still pooled
 * - Anything larger is an oversized one-off allocation
 */

// =============================================================================
// SIZE CLASSES
// =============================================================================

/// Exponent of the smallest class (2^6 = 64 bytes)
pub const MIN_CLASS_EXP: u32 = 6;

/// Exponent of the largest class (2^26 = 64 MiB)
pub const MAX_CLASS_EXP: u32 = 26;

/// Number of size classes, both ends inclusive (64B ..= 64MiB)
pub const CLASS_COUNT: usize = (MAX_CLASS_EXP - MIN_CLASS_EXP + 1) as usize;

/// Index of the top class
pub const TOP_CLASS: usize = CLASS_COUNT - 1;

/// Capacity of the smallest class (64 bytes)
/// Returned fragments below this are discarded
pub const MIN_CLASS_CAPACITY: usize = 1 << MIN_CLASS_EXP;

/// Capacity of the largest class (64 MiB)
/// Requests above this bypass the buckets entirely
pub const MAX_CLASS_CAPACITY: usize = 1 << MAX_CLASS_EXP;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Per-class retention cap read by `PoolConfig::from_env`
pub const ENV_RETAIN_LIMIT: &str = "BUFPOOL_RETAIN_LIMIT";

/// Switches `init_tracing` to JSON output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "BUFPOOL_TRACE_JSON";
