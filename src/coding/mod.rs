//! Integer codecs used by the block format.
//!
//! - [`varint`]: base-128 variable-length integers for record headers.
//! - [`fixed`]: 4-byte little-endian integers for the restart trailer.

pub mod fixed;
pub mod varint;
