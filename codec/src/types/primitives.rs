//! Codec implementations for Rust primitive types.
//!
//! All primitives have a compile-time constant `SIZE`. Multi-byte integers are two's complement
//! and floats are IEEE-754, arranged according to the [`Order`] given at the call site. Single
//! bytes ignore the order.
//!
//! `bool` is read leniently: `0x00` is `false` and every other byte is `true`. It is always
//! written as `0x00` or `0x01`.

use crate::{util::at_least, Error, FixedSize, Order, Read, Write};
use bytes::{Buf, BufMut};
use paste::paste;

// Single-byte types
macro_rules! impl_byte {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, buf: &mut impl BufMut, _: Order) {
                buf.$write_method(*self);
            }
        }

        impl Read for $type {
            #[inline]
            fn read(buf: &mut impl Buf, _: Order) -> Result<Self, Error> {
                at_least(buf, 1)?;
                Ok(buf.$read_method())
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = 1;
        }
    };
}

impl_byte!(u8, get_u8, put_u8);
impl_byte!(i8, get_i8, put_i8);

// Multi-byte numeric types
macro_rules! impl_numeric {
    ($type:ty) => {
        paste! {
            impl Write for $type {
                #[inline]
                fn write(&self, buf: &mut impl BufMut, order: Order) {
                    order.[<write_ $type>](*self, buf);
                }
            }

            impl Read for $type {
                #[inline]
                fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
                    order.[<read_ $type>](buf)
                }
            }

            impl FixedSize for $type {
                const SIZE: usize = std::mem::size_of::<$type>();
            }
        }
    };
}

impl_numeric!(u16);
impl_numeric!(i16);
impl_numeric!(u32);
impl_numeric!(i32);
impl_numeric!(u64);
impl_numeric!(i64);
impl_numeric!(f32);
impl_numeric!(f64);

// Bool implementation
impl Write for bool {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, _: Order) {
        buf.put_u8(if *self { 1 } else { 0 });
    }
}

impl Read for bool {
    #[inline]
    fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
        Ok(u8::read(buf, order)? != 0)
    }
}

impl FixedSize for bool {
    const SIZE: usize = 1;
}
