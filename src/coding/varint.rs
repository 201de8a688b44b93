use crate::error::{Error, Result};

/// Maximum encoded length of a u32: ceil(32 / 7) groups.
pub const MAX_LEN: usize = 5;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7f;

/// Encode `value` into a stack buffer, returning the buffer and the number
/// of bytes used.
///
/// Groups of 7 bits are emitted least-significant first. Every group except
/// the last has the continuation bit (0x80) set.
///
/// ```text
/// 300 = 0b10_0101100 → [0xAC, 0x02]
/// ```
pub fn encode_u32(mut value: u32) -> ([u8; MAX_LEN], usize) {
    let mut buf = [0u8; MAX_LEN];
    let mut n = 0;
    while value >= CONTINUATION as u32 {
        buf[n] = (value as u8 & PAYLOAD) | CONTINUATION;
        value >>= 7;
        n += 1;
    }
    buf[n] = value as u8;
    (buf, n + 1)
}

/// Append the varint encoding of `value` to `dst`.
pub fn put_u32(dst: &mut Vec<u8>, value: u32) {
    let (buf, n) = encode_u32(value);
    dst.extend_from_slice(&buf[..n]);
}

/// Number of bytes `value` occupies once encoded.
pub fn encoded_len(value: u32) -> usize {
    match value {
        0..0x80 => 1,
        0x80..0x4000 => 2,
        0x4000..0x20_0000 => 3,
        0x20_0000..0x1000_0000 => 4,
        _ => 5,
    }
}

/// Decode a varint from the front of `data`, returning (value, bytes_consumed).
///
/// Fails with [`Error::InvalidEncoding`] when no terminating group shows up
/// within [`MAX_LEN`] bytes, when `data` runs out first, or when the fifth
/// group carries bits above bit 31.
pub fn decode_u32(data: &[u8]) -> Result<(u32, usize)> {
    let mut value = 0u32;
    for (i, &byte) in data.iter().take(MAX_LEN).enumerate() {
        let group = byte & PAYLOAD;
        if i == MAX_LEN - 1 && group > 0x0f {
            return Err(Error::InvalidEncoding);
        }
        value |= (group as u32) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::InvalidEncoding)
}
