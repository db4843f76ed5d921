//! Network endpoint encoding.
//!
//! Layout: `[u8 version][address bytes][u16 port]`. The port follows the requested [`Order`].
//!
//! Every address byte is stored bitwise-inverted (`octet ^ 0xFF`), so `127.0.0.1` travels as
//! `80 FF FF FE`. This is a quirk of the peer protocol this layout interoperates with and must
//! be kept bit-for-bit.
//!
//! Only IPv4 is implemented. The IPv6 byte layout is unknown, so version 6 is rejected with
//! [`Error::Unsupported`] in both directions rather than guessed.

use crate::{util::at_least, Error, FixedSize, Order, Read, Write};
use bytes::{Buf, BufMut};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tracing::debug;

/// Version byte of an IPv4 endpoint.
pub const IPV4: u8 = 4;

/// Version byte of an IPv6 endpoint.
pub const IPV6: u8 = 6;

const IPV4_LEN: usize = 4;
const IPV6_LEN: usize = 16;
const UNSUPPORTED_IPV6: &str = "ipv6 address";

#[inline]
fn invert<const N: usize>(octets: [u8; N]) -> [u8; N] {
    octets.map(|octet| !octet)
}

/// Writes an endpoint given its raw address bytes.
///
/// When `version` is `None` it is derived from the address length (4 bytes is IPv4, 16 bytes is
/// IPv6). Nothing is written on failure.
pub fn write_raw(
    ip: &[u8],
    port: u16,
    version: Option<u8>,
    buf: &mut impl BufMut,
    order: Order,
) -> Result<(), Error> {
    let version = match version {
        Some(version) => version,
        None => match ip.len() {
            IPV4_LEN => IPV4,
            IPV6_LEN => IPV6,
            len => return Err(Error::InvalidAddressLength(len)),
        },
    };
    match version {
        IPV4 => {
            let octets: [u8; IPV4_LEN] = ip
                .try_into()
                .map_err(|_| Error::InvalidAddressLength(ip.len()))?;
            SocketAddrV4::new(Ipv4Addr::from(octets), port).write(buf, order);
            Ok(())
        }
        IPV6 => {
            debug!(port, "refusing to encode ipv6 address");
            Err(Error::Unsupported(UNSUPPORTED_IPV6))
        }
        version => Err(Error::InvalidAddressVersion(version)),
    }
}

/// Writes a socket address, failing for IPv6.
pub fn write_socket_addr(
    addr: &SocketAddr,
    buf: &mut impl BufMut,
    order: Order,
) -> Result<(), Error> {
    match addr {
        SocketAddr::V4(v4) => {
            v4.write(buf, order);
            Ok(())
        }
        SocketAddr::V6(v6) => {
            debug!(addr = %v6, "refusing to encode ipv6 address");
            Err(Error::Unsupported(UNSUPPORTED_IPV6))
        }
    }
}

impl Write for SocketAddrV4 {
    #[inline]
    fn write(&self, buf: &mut impl BufMut, order: Order) {
        buf.put_u8(IPV4);
        buf.put_slice(&invert(self.ip().octets()));
        order.write_u16(self.port(), buf);
    }
}

impl Read for SocketAddrV4 {
    #[inline]
    fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
        match SocketAddr::read(buf, order)? {
            SocketAddr::V4(v4) => Ok(v4),
            SocketAddr::V6(_) => Err(Error::Unsupported(UNSUPPORTED_IPV6)),
        }
    }
}

impl FixedSize for SocketAddrV4 {
    const SIZE: usize = 1 + IPV4_LEN + 2;
}

impl Read for SocketAddr {
    #[inline]
    fn read(buf: &mut impl Buf, order: Order) -> Result<Self, Error> {
        at_least(buf, 1)?;
        match buf.get_u8() {
            IPV4 => {
                at_least(buf, IPV4_LEN + 2)?;
                let mut octets = [0u8; IPV4_LEN];
                buf.copy_to_slice(&mut octets);
                let port = order.read_u16(buf)?;
                Ok(SocketAddr::V4(SocketAddrV4::new(
                    Ipv4Addr::from(invert(octets)),
                    port,
                )))
            }
            IPV6 => {
                debug!("refusing to decode ipv6 address");
                Err(Error::Unsupported(UNSUPPORTED_IPV6))
            }
            version => Err(Error::InvalidAddressVersion(version)),
        }
    }
}
