//! Error types for stream operations

use std::string::FromUtf8Error;
use thiserror::Error;

/// Error type for stream and codec operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("buffer underflow: needed {needed} bytes, {remaining} remaining")]
    BufferUnderflow { needed: usize, remaining: usize },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid hex string")]
    InvalidHex,
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
    #[error("invalid address version: {0}")]
    InvalidAddressVersion(u8),
    #[error("invalid address length: {0}")]
    InvalidAddressLength(usize),
    #[error("invalid utf-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
    #[error("triad out of range: {0}")]
    InvalidTriad(u32),
}
