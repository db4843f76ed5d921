//! Hex-encoded byte fields.
//!
//! Hex strings carry no length prefix. They describe fixed-size fields, such as magic numbers,
//! whose length both sides already know.

use crate::Error;
use bytes::{Buf, BufMut};

/// Converts bytes to a lowercase hexadecimal string.
pub fn to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Converts a hexadecimal string to bytes.
///
/// Fails with [`Error::InvalidHex`] on an odd number of digits or a non-hex character.
pub fn from_hex(text: &str) -> Result<Vec<u8>, Error> {
    ::hex::decode(text).map_err(|_| Error::InvalidHex)
}

/// Decodes `text` and appends the raw bytes. Nothing is written on failure.
pub fn write_hex(text: &str, buf: &mut impl BufMut) -> Result<(), Error> {
    let bytes = from_hex(text)?;
    buf.put_slice(&bytes);
    Ok(())
}

/// Consumes every remaining byte and renders it as hex.
pub fn read_hex(buf: &mut impl Buf) -> String {
    let bytes = buf.copy_to_bytes(buf.remaining());
    to_hex(&bytes)
}
