//! Length-prefixed strings.
//!
//! Layout: `[u16 length][length bytes]`. The prefix counts bytes, not characters, and is
//! arranged in the requested [`Order`]. The payload is copied as-is.

use crate::{util::at_least, EncodeSize, Error, Order, Read, Write};
use bytes::{Buf, BufMut, Bytes};

/// Length of the string prefix.
pub const PREFIX_SIZE: usize = 2;

/// Writes `payload` behind its `u16` length.
///
/// Panics if `payload` is longer than `u16::MAX` bytes.
pub fn write_prefixed(payload: &[u8], buf: &mut impl BufMut, order: Order) {
    let len = u16::try_from(payload.len()).expect("string length exceeds u16");
    order.write_u16(len, buf);
    buf.put_slice(payload);
}

/// Reads a `u16` length and then that many bytes.
///
/// Fails if either the prefix or the payload is short.
pub fn read_prefixed(buf: &mut impl Buf, order: Order) -> Result<Bytes, Error> {
    let len = order.read_u16(buf)? as usize;
    at_least(buf, len)?;
    Ok(buf.copy_to_bytes(len))
}

impl Write for str {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, order: Order) {
        write_prefixed(self.as_bytes(), buf, order);
    }
}

impl EncodeSize for str {
    #[inline]
    fn encode_size(&self) -> usize {
        PREFIX_SIZE + self.len()
    }
}

impl Write for String {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, order: Order) {
        self.as_str().write(buf, order);
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        self.as_str().encode_size()
    }
}

impl Read for String {
    #[inline]
    fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
        let payload = read_prefixed(buf, order)?;
        Ok(String::from_utf8(payload.to_vec())?)
    }
}
