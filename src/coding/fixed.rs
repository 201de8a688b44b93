use crate::error::{Error, Result};

/// Encoded width of a fixed32.
pub const LEN: usize = 4;

/// Encode `value` as 4 bytes, least-significant byte first.
pub fn encode_u32(value: u32) -> [u8; LEN] {
    value.to_le_bytes()
}

/// Append the fixed32 encoding of `value` to `dst`.
pub fn put_u32(dst: &mut Vec<u8>, value: u32) {
    dst.extend_from_slice(&encode_u32(value));
}

/// Decode a fixed32 from the first 4 bytes of `data`.
pub fn decode_u32(data: &[u8]) -> Result<u32> {
    let bytes: [u8; LEN] = data
        .get(..LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::Truncated)?;
    Ok(u32::from_le_bytes(bytes))
}
