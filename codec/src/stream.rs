//! Cursor-based binary stream.
//!
//! A [`Stream`] owns a growable buffer and a read cursor. Writes append to the end of the
//! buffer and never move the cursor; reads consume bytes from the cursor onward.
//!
//! There are two read policies:
//!
//! - Raw reads ([`Stream::get`], [`Stream::skip`]) clamp to the bytes that remain and return
//!   whatever is available, possibly nothing.
//! - Typed reads (`read_*`) are strict. If the value needs more bytes than remain, they fail with
//!   [`Error::BufferUnderflow`], move the cursor to the end of the buffer, and never return a
//!   partially decoded value.
//!
//! The validity flag ([`Stream::is_valid`]) reports whether the last read tried to consume more
//! bytes than remained. Any read that is fully served sets it again.
//!
//! # Example
//!
//! ```
//! use binstream_codec::{Order, Stream};
//!
//! let mut stream = Stream::new();
//! stream.write_u32(0xCAFE, Order::Little);
//! stream.write_string("hello", Order::Little);
//! stream.write_bool(true);
//!
//! assert_eq!(stream.read_u32(Order::Little).unwrap(), 0xCAFE);
//! assert_eq!(stream.read_string(Order::Little).unwrap(), "hello");
//! assert!(stream.read_bool().unwrap());
//! assert!(stream.read_u8().is_err());
//! ```

use crate::{
    types::{hex, net, string, triad::Triad},
    Error, Order, Read, Write,
};
use bytes::{BufMut, Bytes, BytesMut};
use paste::paste;
use std::{io, net::SocketAddr};
use tracing::trace;

/// A growable byte buffer with a read cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stream {
    buf: BytesMut,
    off: usize,
    valid: bool,
}

impl Default for Stream {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_stream_numeric {
    ($type:ty) => {
        paste! {
            /// Reads a value in `order`, failing if too few bytes remain.
            #[inline]
            pub fn [<read_ $type>](&mut self, order: Order) -> Result<$type, Error> {
                self.read_value(order)
            }

            /// Appends a value in `order`.
            #[inline]
            pub fn [<write_ $type>](&mut self, value: $type, order: Order) {
                self.write_value(&value, order);
            }
        }
    };
}

impl Stream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::from_buf(BytesMut::new())
    }

    /// Creates a stream over a copy of `bytes`.
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::from_buf(BytesMut::from(bytes.as_ref()))
    }

    fn from_buf(buf: BytesMut) -> Self {
        Self {
            buf,
            off: 0,
            valid: true,
        }
    }

    /// Returns the cursor position.
    pub fn offset(&self) -> usize {
        self.off
    }

    /// Returns false if the last read tried to consume more bytes than remained.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns up to `n` of the remaining bytes and advances the cursor past them.
    ///
    /// Returns fewer bytes (possibly none) when fewer remain. The cursor advances by the number
    /// of bytes returned.
    pub fn get(&mut self, n: usize) -> &[u8] {
        let remaining = self.remaining_len();
        self.valid = n <= remaining;
        if !self.valid {
            trace!(requested = n, remaining, offset = self.off, "short get");
        }
        let start = self.off;
        self.off += n.min(remaining);
        &self.buf[start..self.off]
    }

    /// Appends `bytes` to the end of the buffer.
    pub fn put(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the unread bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.buf[self.off..]
    }

    /// Returns the whole buffer, including bytes already read.
    pub fn all_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Replaces the buffer with a copy of `bytes` and rewinds the cursor.
    pub fn set_bytes(&mut self, bytes: impl AsRef<[u8]>) {
        self.reset();
        self.buf.extend_from_slice(bytes.as_ref());
    }

    /// Returns the total length of the buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the buffer holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of unread bytes.
    pub fn remaining_len(&self) -> usize {
        self.buf.len() - self.off
    }

    /// Advances the cursor by `n` bytes, stopping at the end of the buffer.
    pub fn skip(&mut self, n: usize) {
        self.off += n.min(self.remaining_len());
    }

    /// Appends `n` zero bytes.
    pub fn pad(&mut self, n: usize) {
        self.buf.put_bytes(0, n);
    }

    /// Empties the buffer, rewinds the cursor and marks the stream valid.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.off = 0;
        self.valid = true;
    }

    /// Consumes the stream, returning the whole buffer.
    pub fn into_bytes(self) -> BytesMut {
        self.buf
    }

    /// Consumes the stream, returning the whole buffer as immutable [`Bytes`].
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    fn exhaust(&mut self, err: &Error) {
        trace!(offset = self.off, len = self.buf.len(), %err, "strict read ran past end");
        self.off = self.buf.len();
        self.valid = false;
    }

    fn read_with<T>(
        &mut self,
        read: impl FnOnce(&mut &[u8]) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut reader = &self.buf[self.off..];
        let result = read(&mut reader);
        let consumed = self.remaining_len() - reader.len();
        self.off += consumed;
        match &result {
            Err(err) if loses_framing(err) => self.exhaust(err),
            _ => self.valid = true,
        }
        result
    }

    /// Reads any [`Read`] type in `order`.
    ///
    /// When the value's end cannot be located ([`Error::BufferUnderflow`], or an endpoint of an
    /// unsupported or unknown version) the cursor moves to the end of the buffer and the stream is
    /// marked invalid, so nothing further is parsed from a misaligned position. On any other error
    /// the cursor stays after the bytes already inspected.
    pub fn read_value<T: Read>(&mut self, order: Order) -> Result<T, Error> {
        self.read_with(|reader| T::read(reader, order))
    }

    /// Appends any [`Write`] type in `order`.
    pub fn write_value<T: Write + ?Sized>(&mut self, value: &T, order: Order) {
        value.write(&mut self.buf, order);
    }

    /// Reads an unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        self.read_value(Order::Big)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        self.read_value(Order::Big)
    }

    /// Reads a byte as a bool: `0x00` is false, anything else true.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        self.read_value(Order::Big)
    }

    /// Appends an unsigned byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Appends a signed byte.
    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    /// Appends `0x01` for true and `0x00` for false.
    pub fn write_bool(&mut self, value: bool) {
        self.write_value(&value, Order::Big);
    }

    impl_stream_numeric!(u16);
    impl_stream_numeric!(i16);
    impl_stream_numeric!(u32);
    impl_stream_numeric!(i32);
    impl_stream_numeric!(u64);
    impl_stream_numeric!(i64);
    impl_stream_numeric!(f32);
    impl_stream_numeric!(f64);

    /// Reads a 3-byte integer in `order`.
    pub fn read_triad(&mut self, order: Order) -> Result<Triad, Error> {
        self.read_value(order)
    }

    /// Appends a 3-byte integer in `order`.
    pub fn write_triad(&mut self, value: Triad, order: Order) {
        self.write_value(&value, order);
    }

    /// Reads a little-endian 3-byte integer.
    pub fn read_triad_le(&mut self) -> Result<Triad, Error> {
        self.read_triad(Order::Little)
    }

    /// Appends a little-endian 3-byte integer.
    pub fn write_triad_le(&mut self, value: Triad) {
        self.write_triad(value, Order::Little);
    }

    /// Reads a `u16` length-prefixed UTF-8 string.
    pub fn read_string(&mut self, order: Order) -> Result<String, Error> {
        self.read_value(order)
    }

    /// Reads a `u16` length-prefixed payload without interpreting it.
    pub fn read_string_bytes(&mut self, order: Order) -> Result<Bytes, Error> {
        self.read_with(|reader| string::read_prefixed(reader, order))
    }

    /// Appends `value` behind its `u16` byte length.
    ///
    /// Panics if `value` is longer than `u16::MAX` bytes.
    pub fn write_string(&mut self, value: &str, order: Order) {
        self.write_value(value, order);
    }

    /// Consumes every remaining byte and renders it as lowercase hex.
    pub fn read_hex(&mut self) -> String {
        let mut reader = &self.buf[self.off..];
        let hex = hex::read_hex(&mut reader);
        self.off = self.buf.len() - reader.len();
        self.valid = true;
        hex
    }

    /// Reads exactly `n` bytes and renders them as lowercase hex.
    pub fn read_hex_exact(&mut self, n: usize) -> Result<String, Error> {
        let remaining = self.remaining_len();
        if remaining < n {
            let err = Error::BufferUnderflow {
                needed: n,
                remaining,
            };
            self.exhaust(&err);
            return Err(err);
        }
        Ok(hex::to_hex(self.get(n)))
    }

    /// Decodes hex text and appends the raw bytes (no length prefix).
    pub fn write_hex(&mut self, text: &str) -> Result<(), Error> {
        hex::write_hex(text, &mut self.buf)
    }

    /// Reads a network endpoint.
    ///
    /// An endpoint with an unsupported or unknown version byte has no known length, so it
    /// exhausts the stream the same way an underflow does.
    pub fn read_address(&mut self, order: Order) -> Result<SocketAddr, Error> {
        self.read_value(order)
    }

    /// Appends a network endpoint. IPv6 fails with [`Error::Unsupported`].
    pub fn write_address(&mut self, addr: &SocketAddr, order: Order) -> Result<(), Error> {
        net::write_socket_addr(addr, &mut self.buf, order)
    }

    /// Appends a network endpoint from raw address bytes, deriving the version from their
    /// length when `version` is `None`.
    pub fn write_address_raw(
        &mut self,
        ip: &[u8],
        port: u16,
        version: Option<u8>,
        order: Order,
    ) -> Result<(), Error> {
        net::write_raw(ip, port, version, &mut self.buf, order)
    }
}

/// Errors after which the end of the value being read is unknown.
fn loses_framing(err: &Error) -> bool {
    matches!(
        err,
        Error::BufferUnderflow { .. } | Error::Unsupported(_) | Error::InvalidAddressVersion(_)
    )
}

impl From<&[u8]> for Stream {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Stream {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&str> for Stream {
    fn from(text: &str) -> Self {
        Self::from_bytes(text)
    }
}

impl From<String> for Stream {
    fn from(text: String) -> Self {
        Self::from_bytes(text)
    }
}

impl From<Bytes> for Stream {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<BytesMut> for Stream {
    fn from(buf: BytesMut) -> Self {
        Self::from_buf(buf)
    }
}

impl io::Read for Stream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = out.len().min(self.remaining_len());
        out[..n].copy_from_slice(&self.buf[self.off..self.off + n]);
        self.off += n;
        Ok(n)
    }
}

impl io::Write for Stream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.put(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, SocketAddrV4};

    const MAGIC: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn test_reset() {
        let mut stream = Stream::from_bytes(MAGIC);
        stream.get(3);
        stream.reset();
        assert_eq!(stream.len(), 0);
        assert_eq!(stream.remaining_len(), 0);
        assert_eq!(stream.offset(), 0);
        assert!(stream.is_valid());
    }

    #[test]
    fn test_reset_idempotent() {
        let mut once = Stream::from_bytes(MAGIC);
        once.skip(4);
        once.reset();
        let mut twice = once.clone();
        twice.reset();
        assert_eq!(once, twice);
        assert_eq!(twice, Stream::new());
    }

    #[test]
    fn test_offset() {
        let mut stream = Stream::from_bytes(MAGIC);
        stream.get(MAGIC.len());
        assert_eq!(stream.offset(), MAGIC.len());
        assert_eq!(stream.remaining_len(), 0);
    }

    #[test]
    fn test_get() {
        let mut stream = Stream::from_bytes(MAGIC);
        assert_eq!(stream.get(5), &MAGIC[..5]);
        assert_eq!(stream.get(11), &MAGIC[5..]);
        assert!(stream.is_valid());

        // Overflow
        assert_eq!(stream.get(1), &[] as &[u8]);
        assert!(!stream.is_valid());

        stream.set_bytes(MAGIC);
        assert!(stream.is_valid());
        assert_eq!(stream.get(MAGIC.len() + 1), &MAGIC[..]);
        assert_eq!(stream.offset(), MAGIC.len());
    }

    #[test]
    fn test_put() {
        let mut stream = Stream::new();
        stream.put(&MAGIC);
        assert_eq!(stream.bytes(), &MAGIC[..]);

        stream.put(&MAGIC);
        let expected = [MAGIC, MAGIC].concat();
        assert_eq!(stream.bytes(), &expected[..]);
        assert_eq!(stream.offset(), 0);
    }

    #[test]
    fn test_bytes() {
        let mut stream = Stream::from_bytes(MAGIC);
        assert_eq!(stream.bytes(), &MAGIC[..]);
        stream.skip(5);
        assert_eq!(stream.bytes(), &MAGIC[5..]);
        assert_eq!(stream.all_bytes(), &MAGIC[..]);
    }

    #[test]
    fn test_set_bytes() {
        let mut stream = Stream::from_bytes([0xff, 0xff, 0xff, 0xff]);
        stream.skip(2);
        stream.set_bytes(MAGIC);
        assert_eq!(stream.bytes(), &MAGIC[..]);
        assert_eq!(stream.offset(), 0);
    }

    #[test]
    fn test_skip() {
        let mut stream = Stream::from_bytes(MAGIC);
        stream.skip(5);
        assert_eq!(stream.bytes(), &MAGIC[5..]);
        stream.skip(10);
        assert_eq!(stream.bytes(), &MAGIC[15..]);

        stream.set_bytes(MAGIC);
        stream.skip(stream.remaining_len() + 1);
        assert!(stream.bytes().is_empty());
        assert_eq!(stream.offset(), MAGIC.len());
    }

    #[test]
    fn test_pad() {
        let mut stream = Stream::new();
        stream.pad(8);
        assert_eq!(stream.bytes(), &[0u8; 8][..]);
        stream.pad(0);
        assert_eq!(stream.len(), 8);
    }

    #[test]
    fn test_strict_underflow() {
        let mut stream = Stream::from_bytes([0x01, 0x02, 0x03]);
        assert_eq!(
            stream.read_u32(Order::Big),
            Err(Error::BufferUnderflow {
                needed: 4,
                remaining: 3
            })
        );
        assert_eq!(stream.offset(), 3);
        assert!(!stream.is_valid());
        assert_eq!(
            stream.read_u8(),
            Err(Error::BufferUnderflow {
                needed: 1,
                remaining: 0
            })
        );
    }

    #[test]
    fn test_validity_tracks_last_read() {
        let mut stream = Stream::from_bytes([0x01]);
        assert!(stream.read_u16(Order::Big).is_err());
        assert!(!stream.is_valid());

        stream.put(&[0x00, 0x05]);
        assert_eq!(stream.read_u16(Order::Big).unwrap(), 5);
        assert!(stream.is_valid());

        assert_eq!(stream.get(1), &[] as &[u8]);
        assert!(!stream.is_valid());
        stream.put(&[0x07]);
        assert_eq!(stream.get(1), &[0x07]);
        assert!(stream.is_valid());

        assert!(stream.read_hex_exact(1).is_err());
        stream.put(&[0xAB, 0xCD]);
        assert_eq!(stream.read_hex_exact(1).unwrap(), "ab");
        assert!(stream.is_valid());

        assert!(stream.read_string_bytes(Order::Big).is_err());
        assert!(!stream.is_valid());
        assert_eq!(stream.read_hex(), "");
        assert!(stream.is_valid());
    }

    #[test]
    fn test_short_string_payload_exhausts() {
        let mut stream = Stream::from_bytes([0x00, 0x04, b'a', b'b']);
        assert!(matches!(
            stream.read_string(Order::Big),
            Err(Error::BufferUnderflow {
                needed: 4,
                remaining: 2
            })
        ));
        assert_eq!(stream.remaining_len(), 0);

        let mut stream = Stream::from_bytes([0x04, 0x00, b'a', b'b']);
        assert!(stream.read_string_bytes(Order::Little).is_err());
        assert_eq!(stream.remaining_len(), 0);
        assert!(!stream.is_valid());
    }

    #[test]
    fn test_rejected_address_exhausts() {
        let mut stream = Stream::from_bytes([0x05, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xAA]);
        assert_eq!(
            stream.read_address(Order::Big),
            Err(Error::InvalidAddressVersion(5))
        );
        assert!(!stream.is_valid());
        assert_eq!(stream.remaining_len(), 0);

        let mut stream = Stream::from_bytes([0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(matches!(
            stream.read_address(Order::Big),
            Err(Error::Unsupported(_))
        ));
        assert!(!stream.is_valid());
        assert_eq!(stream.offset(), stream.len());
        assert!(matches!(
            stream.read_u16(Order::Big),
            Err(Error::BufferUnderflow { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_keeps_framing() {
        let mut stream = Stream::from_bytes([0x00, 0x01, 0xFF, 0x2A]);
        assert!(matches!(
            stream.read_string(Order::Big),
            Err(Error::InvalidUtf8(_))
        ));
        assert!(stream.is_valid());
        assert_eq!(stream.read_u8().unwrap(), 0x2A);
    }

    #[test]
    fn test_primitives_in_both_orders() {
        let mut stream = Stream::new();
        for order in [Order::Big, Order::Little] {
            stream.write_u8(0xAB);
            stream.write_i8(-5);
            stream.write_u16(u16::MAX, order);
            stream.write_i16(i16::MIN, order);
            stream.write_u32(0xDEADBEEF, order);
            stream.write_i32(-1, order);
            stream.write_u64(u64::MAX - 1, order);
            stream.write_i64(i64::MIN, order);
            stream.write_f32(1.5, order);
            stream.write_f64(-2.25, order);
            stream.write_bool(false);
        }
        for order in [Order::Big, Order::Little] {
            assert_eq!(stream.read_u8().unwrap(), 0xAB);
            assert_eq!(stream.read_i8().unwrap(), -5);
            assert_eq!(stream.read_u16(order).unwrap(), u16::MAX);
            assert_eq!(stream.read_i16(order).unwrap(), i16::MIN);
            assert_eq!(stream.read_u32(order).unwrap(), 0xDEADBEEF);
            assert_eq!(stream.read_i32(order).unwrap(), -1);
            assert_eq!(stream.read_u64(order).unwrap(), u64::MAX - 1);
            assert_eq!(stream.read_i64(order).unwrap(), i64::MIN);
            assert_eq!(stream.read_f32(order).unwrap(), 1.5);
            assert_eq!(stream.read_f64(order).unwrap(), -2.25);
            assert!(!stream.read_bool().unwrap());
        }
        assert_eq!(stream.remaining_len(), 0);
        assert!(stream.is_valid());
    }

    #[test]
    fn test_triad() {
        let value = Triad::new(0x123456).unwrap();
        let mut stream = Stream::new();
        stream.write_triad_le(value);
        stream.write_triad(value, Order::Big);
        assert_eq!(stream.bytes(), &[0x56, 0x34, 0x12, 0x12, 0x34, 0x56]);
        assert_eq!(stream.read_triad_le().unwrap(), value);
        assert_eq!(stream.read_triad(Order::Big).unwrap(), value);
    }

    #[test]
    fn test_string() {
        let mut stream = Stream::new();
        stream.write_string("", Order::Big);
        assert_eq!(stream.bytes(), &[0x00, 0x00]);
        stream.write_string("hello", Order::Big);
        assert_eq!(stream.read_string(Order::Big).unwrap(), "");
        assert_eq!(
            stream.read_string_bytes(Order::Big).unwrap(),
            Bytes::from_static(b"hello")
        );
    }

    #[test]
    fn test_hex() {
        let mut stream = Stream::new();
        stream.write_hex("00ffff00").unwrap();
        stream.write_u8(0x2A);
        assert_eq!(stream.write_hex("0g"), Err(Error::InvalidHex));
        assert_eq!(stream.len(), 5);
        assert_eq!(stream.read_hex_exact(4).unwrap(), "00ffff00");
        assert_eq!(stream.read_hex(), "2a");
        assert_eq!(stream.read_hex(), "");
        assert!(stream.is_valid());

        let mut stream = Stream::from_bytes([0x01, 0x02]);
        assert!(matches!(
            stream.read_hex_exact(3),
            Err(Error::BufferUnderflow {
                needed: 3,
                remaining: 2
            })
        ));
        assert_eq!(stream.remaining_len(), 0);
    }

    #[test]
    fn test_address() {
        let addr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 19132));
        let mut stream = Stream::new();
        stream.write_address(&addr, Order::Big).unwrap();
        assert_eq!(stream.bytes(), &[0x04, 0x80, 0xFF, 0xFF, 0xFE, 0x4A, 0xBC]);
        stream
            .write_address_raw(&[127, 0, 0, 1], 19132, None, Order::Little)
            .unwrap();
        assert_eq!(stream.read_address(Order::Big).unwrap(), addr);
        assert_eq!(stream.read_address(Order::Little).unwrap(), addr);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Stream::from("abc").bytes(), b"abc");
        assert_eq!(Stream::from(String::from("abc")).bytes(), b"abc");
        assert_eq!(Stream::from(vec![1u8, 2]).bytes(), &[1, 2]);
        assert_eq!(Stream::from(&[1u8, 2][..]).len(), 2);
        assert_eq!(Stream::from(Bytes::from_static(&[9])).bytes(), &[9]);
        assert_eq!(Stream::from(BytesMut::from(&b"xy"[..])).len(), 2);

        let mut stream = Stream::from_bytes([1, 2, 3]);
        stream.skip(1);
        assert_eq!(stream.clone().into_bytes(), &[1, 2, 3][..]);
        assert_eq!(stream.freeze(), Bytes::from_static(&[1, 2, 3]));
    }

    #[test]
    fn test_io() {
        use std::io::{Read as _, Write as _};

        let mut stream = Stream::new();
        stream.write_all(&MAGIC).unwrap();
        stream.flush().unwrap();
        let mut out = [0u8; 10];
        assert_eq!(stream.read(&mut out).unwrap(), 10);
        assert_eq!(out, MAGIC[..10]);
        assert_eq!(stream.read(&mut out).unwrap(), 6);
        assert_eq!(stream.read(&mut out).unwrap(), 0);
        assert!(stream.is_valid());
    }
}
