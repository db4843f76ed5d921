//! A [`Stream`] bound to a single [`Order`].
//!
//! The order is chosen at construction and cannot change afterwards. Consumers that need both
//! orders either keep two streams or call the order-taking accessors on [`Stream`] directly,
//! which remain reachable through [`Deref`].

use crate::{types::triad::Triad, Error, Order, Read, Stream, Write};
use bytes::Bytes;
use paste::paste;
use std::{
    net::SocketAddr,
    ops::{Deref, DerefMut},
};

/// A [`Stream`] whose multi-byte accessors use a fixed [`Order`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedStream {
    stream: Stream,
    order: Order,
}

macro_rules! impl_ordered_numeric {
    ($type:ty) => {
        paste! {
            /// Reads a value in the bound order, failing if too few bytes remain.
            #[inline]
            pub fn [<read_ $type>](&mut self) -> Result<$type, Error> {
                self.stream.[<read_ $type>](self.order)
            }

            /// Appends a value in the bound order.
            #[inline]
            pub fn [<write_ $type>](&mut self, value: $type) {
                self.stream.[<write_ $type>](value, self.order);
            }
        }
    };
}

impl OrderedStream {
    /// Creates an empty stream bound to `order`.
    pub fn new(order: Order) -> Self {
        Self::with_stream(order, Stream::new())
    }

    /// Creates a stream bound to `order` over a copy of `bytes`.
    pub fn from_bytes(order: Order, bytes: impl AsRef<[u8]>) -> Self {
        Self::with_stream(order, Stream::from_bytes(bytes))
    }

    /// Binds an existing stream to `order`, keeping its buffer and cursor.
    pub fn with_stream(order: Order, stream: Stream) -> Self {
        Self { stream, order }
    }

    /// Returns the bound order.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Releases the underlying stream.
    pub fn into_inner(self) -> Stream {
        self.stream
    }

    /// Reads any [`Read`] type in the bound order.
    pub fn read_value<T: Read>(&mut self) -> Result<T, Error> {
        self.stream.read_value(self.order)
    }

    /// Appends any [`Write`] type in the bound order.
    pub fn write_value<T: Write + ?Sized>(&mut self, value: &T) {
        self.stream.write_value(value, self.order);
    }

    impl_ordered_numeric!(u16);
    impl_ordered_numeric!(i16);
    impl_ordered_numeric!(u32);
    impl_ordered_numeric!(i32);
    impl_ordered_numeric!(u64);
    impl_ordered_numeric!(i64);
    impl_ordered_numeric!(f32);
    impl_ordered_numeric!(f64);

    /// Reads a 3-byte integer in the bound order.
    pub fn read_triad(&mut self) -> Result<Triad, Error> {
        self.stream.read_triad(self.order)
    }

    /// Appends a 3-byte integer in the bound order.
    pub fn write_triad(&mut self, value: Triad) {
        self.stream.write_triad(value, self.order);
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, Error> {
        self.stream.read_string(self.order)
    }

    /// Reads a length-prefixed payload without interpreting it.
    pub fn read_string_bytes(&mut self) -> Result<Bytes, Error> {
        self.stream.read_string_bytes(self.order)
    }

    /// Appends `value` behind its `u16` byte length.
    pub fn write_string(&mut self, value: &str) {
        self.stream.write_string(value, self.order);
    }

    /// Reads a network endpoint.
    pub fn read_address(&mut self) -> Result<SocketAddr, Error> {
        self.stream.read_address(self.order)
    }

    /// Appends a network endpoint. IPv6 fails with [`Error::Unsupported`].
    pub fn write_address(&mut self, addr: &SocketAddr) -> Result<(), Error> {
        self.stream.write_address(addr, self.order)
    }

    /// Appends a network endpoint from raw address bytes.
    pub fn write_address_raw(
        &mut self,
        ip: &[u8],
        port: u16,
        version: Option<u8>,
    ) -> Result<(), Error> {
        self.stream.write_address_raw(ip, port, version, self.order)
    }
}

impl Deref for OrderedStream {
    type Target = Stream;

    fn deref(&self) -> &Stream {
        &self.stream
    }
}

impl DerefMut for OrderedStream {
    fn deref_mut(&mut self) -> &mut Stream {
        &mut self.stream
    }
}

impl AsRef<Stream> for OrderedStream {
    fn as_ref(&self) -> &Stream {
        &self.stream
    }
}
