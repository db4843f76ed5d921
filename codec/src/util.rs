//! Buffer helpers shared by the codec implementations.

use crate::Error;
use bytes::Buf;
use tracing::trace;

/// Checks that at least `len` bytes remain in the buffer.
///
/// Nothing is consumed on failure.
#[inline]
pub fn at_least<B: Buf>(buf: &mut B, len: usize) -> Result<(), Error> {
    let remaining = buf.remaining();
    if remaining < len {
        trace!(needed = len, remaining, "buffer underflow");
        return Err(Error::BufferUnderflow {
            needed: len,
            remaining,
        });
    }
    Ok(())
}
