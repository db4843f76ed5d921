//! 24-bit unsigned integers.
//!
//! Some protocols pack sequence numbers and lengths into 3 bytes. They are little-endian by
//! convention, which is why [`Triad`] implements [`Read`]/[`Write`] honoring the requested
//! [`Order`] while [`crate::Stream`] also offers `*_triad_le` shortcuts.

use crate::{Error, FixedSize, Order, Read, Write};
use bytes::{Buf, BufMut};
use std::fmt;

/// An unsigned integer in the range `0..=0xFF_FFFF`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triad(u32);

impl Triad {
    /// Largest representable value.
    pub const MAX: Triad = Triad(0xFF_FFFF);

    /// Creates a triad, failing if `value` does not fit in 24 bits.
    pub fn new(value: u32) -> Result<Self, Error> {
        if value > Self::MAX.0 {
            return Err(Error::InvalidTriad(value));
        }
        Ok(Self(value))
    }

    /// Keeps only the low 24 bits of `value`.
    pub(crate) fn from_u32_truncated(value: u32) -> Self {
        Self(value & Self::MAX.0)
    }

    /// Returns the value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Triad {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<u16> for Triad {
    fn from(value: u16) -> Self {
        Self(value as u32)
    }
}

impl From<Triad> for u32 {
    fn from(value: Triad) -> Self {
        value.0
    }
}

impl fmt::Display for Triad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Write for Triad {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, order: Order) {
        order.write_triad(*self, buf);
    }
}

impl Read for Triad {
    #[inline]
    fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
        order.read_triad(buf)
    }
}

impl FixedSize for Triad {
    const SIZE: usize = 3;
}
