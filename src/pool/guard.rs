/*!
 * Pooled Buffer Guard
 * RAII handle that returns its buffer to the pool on drop
 */

use super::BufferPool;
use bytes::BytesMut;
use std::ops::{Deref, DerefMut};

/// Buffer borrowed from a [`BufferPool`]
///
/// # Example
///
/// ```
/// use bytes_memory_pool::BufferPool;
///
/// let pool = BufferPool::new();
/// {
///     let mut buf = pool.acquire_pooled(100);
///     buf.extend_from_slice(b"data");
/// } // returned to the pool here
/// assert_eq!(pool.donation_count(1), Some(1));
/// ```
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    inner: Option<BytesMut>,
}

impl<'a> PooledBuffer<'a> {
    pub(super) fn new(pool: &'a BufferPool, buf: BytesMut) -> Self {
        Self {
            pool,
            inner: Some(buf),
        }
    }

    /// Detach the buffer; it will not be returned to the pool
    #[inline]
    pub fn into_inner(mut self) -> BytesMut {
        self.inner.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = BytesMut;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        // Only `into_inner` and `drop` take the buffer, and both consume self
        self.inner.as_ref().expect("pooled buffer already taken")
    }
}

impl DerefMut for PooledBuffer<'_> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.inner.as_mut().expect("pooled buffer already taken")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(self.inner.take());
    }
}

impl std::fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}
