//! Read and write ordered binary primitives over a cursor-based buffer.
//!
//! # Overview
//!
//! A low-level serialization layer for packet encoders:
//! - [`Stream`] owns a growable buffer and a read cursor
//! - [`Order`] selects big-endian or little-endian arrangement of multi-byte values
//! - [`OrderedStream`] binds a [`Stream`] to one [`Order`] for its whole lifetime
//!
//! # Supported Types
//!
//! - Integers: `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64` (two's complement)
//! - Floats: `f32`, `f64` (IEEE-754)
//! - `bool` (`0x00` is false, anything else true)
//! - [`Triad`]: 24-bit unsigned integers
//! - Strings: `[u16 length][bytes]`
//! - Hex strings for fixed-size fields, with no length prefix
//! - IPv4 endpoints: `[u8 version][inverted octets][u16 port]`
//!
//! Every typed read is strict: it either decodes a whole value or fails with
//! [`Error::BufferUnderflow`].
//!
//! # Example
//!
//! ```
//! use binstream_codec::{Order, OrderedStream};
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:19132".parse().unwrap();
//!
//! let mut packet = OrderedStream::new(Order::Big);
//! packet.write_u8(0x1c);
//! packet.write_i64(-1);
//! packet.write_hex("00ffff00fefefefefdfdfdfd12345678").unwrap();
//! packet.write_address(&addr).unwrap();
//! packet.write_string("MCPE;server");
//!
//! let mut reader = OrderedStream::from_bytes(Order::Big, packet.all_bytes());
//! assert_eq!(reader.read_u8().unwrap(), 0x1c);
//! assert_eq!(reader.read_i64().unwrap(), -1);
//! assert_eq!(reader.read_hex_exact(16).unwrap(), "00ffff00fefefefefdfdfdfd12345678");
//! assert_eq!(reader.read_address().unwrap(), addr);
//! assert_eq!(reader.read_string().unwrap(), "MCPE;server");
//! assert_eq!(reader.remaining_len(), 0);
//! ```
//!
//! # Custom Types
//!
//! Types that are sequences of fields can implement [`Read`] and [`Write`] and are then usable
//! with [`Stream::read_value`] and [`Stream::write_value`]:
//!
//! ```
//! use binstream_codec::{Error, Order, Read, Stream, Write};
//! use bytes::{Buf, BufMut};
//!
//! #[derive(Debug, PartialEq)]
//! struct Ping {
//!     time: i64,
//!     client: u64,
//! }
//!
//! impl Write for Ping {
//!     fn write(&self, buf: &mut impl BufMut, order: Order) {
//!         self.time.write(buf, order);
//!         self.client.write(buf, order);
//!     }
//! }
//!
//! impl Read for Ping {
//!     fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
//!         let time = i64::read(buf, order)?;
//!         let client = u64::read(buf, order)?;
//!         Ok(Self { time, client })
//!     }
//! }
//!
//! let ping = Ping { time: 1, client: 2 };
//! let mut stream = Stream::new();
//! stream.write_value(&ping, Order::Little);
//! assert_eq!(stream.read_value::<Ping>(Order::Little).unwrap(), ping);
//! ```

pub mod codec;
pub mod error;
pub mod order;
pub mod ordered;
pub mod stream;
pub mod types;
pub mod util;

// Re-export main types and traits
pub use codec::{Codec, Decode, Encode, EncodeSize, FixedSize, Read, Write};
pub use error::Error;
pub use order::Order;
pub use ordered::OrderedStream;
pub use stream::Stream;
pub use types::{net, primitives, string, triad::Triad};
