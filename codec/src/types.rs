//! Codec implementations for common types

pub mod hex;
pub mod net;
pub mod primitives;
pub mod string;
pub mod triad;
