//! Byte order strategies.
//!
//! An [`Order`] decides how a multi-byte value maps onto the wire:
//! [`Order::Big`] writes the most significant byte first, [`Order::Little`] the least
//! significant byte first. Every width has four operations:
//!
//! - `encode_*` / `decode_*`: pure conversions between a value and a fixed-size array. Since the
//!   array length is part of the signature, a short input cannot be passed.
//! - `read_*` / `write_*`: the same conversions over a [`Buf`] / [`BufMut`]. Reads are strict and
//!   fail with [`Error::BufferUnderflow`] instead of returning a truncated value.
//!
//! Floats are encoded by reinterpreting their IEEE-754 bit pattern as the integer of the same
//! width.
//!
//! # Example
//!
//! ```
//! use binstream_codec::Order;
//!
//! assert_eq!(Order::Big.encode_u16(0x0102), [0x01, 0x02]);
//! assert_eq!(Order::Little.encode_u16(0x0102), [0x02, 0x01]);
//! assert_eq!(Order::Little.decode_u32([0x04, 0x03, 0x02, 0x01]), 0x01020304);
//! ```

use crate::{types::triad::Triad, util::at_least, Error};
use bytes::{Buf, BufMut};
use paste::paste;

/// Byte arrangement of multi-byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order {
    /// Most significant byte first (network byte order).
    #[default]
    Big,
    /// Least significant byte first.
    Little,
}

macro_rules! impl_order {
    ($type:ty, $size:expr) => {
        paste! {
            /// Encodes a value into its bytes in this order.
            #[inline]
            pub fn [<encode_ $type>](self, value: $type) -> [u8; $size] {
                match self {
                    Order::Big => value.to_be_bytes(),
                    Order::Little => value.to_le_bytes(),
                }
            }

            /// Decodes a value from its bytes in this order.
            #[inline]
            pub fn [<decode_ $type>](self, bytes: [u8; $size]) -> $type {
                match self {
                    Order::Big => <$type>::from_be_bytes(bytes),
                    Order::Little => <$type>::from_le_bytes(bytes),
                }
            }

            /// Reads a value from the buffer, failing if too few bytes remain.
            #[inline]
            pub fn [<read_ $type>](self, buf: &mut impl Buf) -> Result<$type, Error> {
                at_least(buf, $size)?;
                Ok(match self {
                    Order::Big => buf.[<get_ $type>](),
                    Order::Little => buf.[<get_ $type _le>](),
                })
            }

            /// Writes a value to the buffer.
            #[inline]
            pub fn [<write_ $type>](self, value: $type, buf: &mut impl BufMut) {
                match self {
                    Order::Big => buf.[<put_ $type>](value),
                    Order::Little => buf.[<put_ $type _le>](value),
                }
            }
        }
    };
}

impl Order {
    impl_order!(u16, 2);
    impl_order!(i16, 2);
    impl_order!(u32, 4);
    impl_order!(i32, 4);
    impl_order!(u64, 8);
    impl_order!(i64, 8);
    impl_order!(f32, 4);
    impl_order!(f64, 8);

    /// Encodes a [`Triad`] into 3 bytes.
    #[inline]
    pub fn encode_triad(self, value: Triad) -> [u8; 3] {
        let [_, hi, mid, lo] = value.get().to_be_bytes();
        match self {
            Order::Big => [hi, mid, lo],
            Order::Little => [lo, mid, hi],
        }
    }

    /// Decodes a [`Triad`] from 3 bytes.
    #[inline]
    pub fn decode_triad(self, bytes: [u8; 3]) -> Triad {
        let [hi, mid, lo] = match self {
            Order::Big => bytes,
            Order::Little => [bytes[2], bytes[1], bytes[0]],
        };
        Triad::from_u32_truncated(u32::from_be_bytes([0, hi, mid, lo]))
    }

    /// Reads a [`Triad`] from the buffer.
    #[inline]
    pub fn read_triad(self, buf: &mut impl Buf) -> Result<Triad, Error> {
        at_least(buf, 3)?;
        let mut bytes = [0u8; 3];
        buf.copy_to_slice(&mut bytes);
        Ok(self.decode_triad(bytes))
    }

    /// Writes a [`Triad`] to the buffer.
    #[inline]
    pub fn write_triad(self, value: Triad, buf: &mut impl BufMut) {
        buf.put_slice(&self.encode_triad(value));
    }
}
