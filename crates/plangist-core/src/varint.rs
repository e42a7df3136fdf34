//! Signed varints: zig-zag mapping followed by LEB128 groups (low bits first).
//!
//! Every integer in a gist uses this layout, so it is frozen together with the
//! gist version. At most `MAX_VARINT_LEN` bytes are produced for an `i64`.

use crate::error::{Error, Result};

/// Maximum encoded length of a 64-bit varint.
pub const MAX_VARINT_LEN: usize = 10;

/// Encode `value` into `buf`, returning the number of bytes written.
#[allow(clippy::cast_possible_truncation)]
pub fn put_varint(buf: &mut [u8; MAX_VARINT_LEN], value: i64) -> usize {
    let mut ux = (value as u64) << 1;
    if value < 0 {
        ux = !ux;
    }

    let mut i = 0;
    while ux >= 0x80 {
        buf[i] = (ux as u8) | 0x80;
        ux >>= 7;
        i += 1;
    }
    buf[i] = ux as u8;
    i + 1
}

/// Convenience wrapper that appends the encoding of `value` to `out`.
pub fn append_varint(out: &mut Vec<u8>, value: i64) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let n = put_varint(&mut buf, value);
    out.extend_from_slice(&buf[..n]);
}

/// Decode a varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed. `Ok(None)` means the
/// buffer ended mid-varint; an encoding longer than `MAX_VARINT_LEN` bytes or
/// one that overflows 64 bits is an error.
pub fn read_varint(buf: &[u8]) -> Result<Option<(i64, usize)>> {
    let mut ux: u64 = 0;
    let mut shift = 0u32;

    for (i, &byte) in buf.iter().enumerate() {
        if i == MAX_VARINT_LEN {
            return Err(Error::Varint("varint longer than 10 bytes".into()));
        }
        if byte < 0x80 {
            if i == MAX_VARINT_LEN - 1 && byte > 1 {
                return Err(Error::Varint("varint overflows 64 bits".into()));
            }
            ux |= u64::from(byte) << shift;
            let mut value = (ux >> 1) as i64;
            if ux & 1 != 0 {
                value = !value;
            }
            return Ok(Some((value, i + 1)));
        }
        ux |= u64::from(byte & 0x7F) << shift;
        shift += 7;
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(v: i64) -> Vec<u8> {
        let mut out = Vec::new();
        append_varint(&mut out, v);
        out
    }

    #[test]
    fn known_layouts() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x02]);
        assert_eq!(encode(-1), vec![0x01]);
        assert_eq!(encode(5), vec![0x0a]);
        assert_eq!(encode(63), vec![0x7e]);
        assert_eq!(encode(64), vec![0x80, 0x01]);
        assert_eq!(encode(-65), vec![0x81, 0x01]);
    }

    #[test]
    fn extremes_use_the_full_width() {
        assert_eq!(encode(i64::MAX).len(), MAX_VARINT_LEN);
        assert_eq!(encode(i64::MIN).len(), MAX_VARINT_LEN);
        for v in [i64::MIN, i64::MIN + 1, -300, 300, i64::MAX] {
            let bytes = encode(v);
            assert_eq!(read_varint(&bytes).unwrap(), Some((v, bytes.len())));
        }
    }

    #[test]
    fn reads_only_the_leading_varint() {
        let bytes = [0x80, 0x01, 0xff];
        assert_eq!(read_varint(&bytes).unwrap(), Some((64, 2)));
    }

    #[test]
    fn truncated_input_is_not_an_error() {
        assert_eq!(read_varint(&[]).unwrap(), None);
        assert_eq!(read_varint(&[0x80, 0x80]).unwrap(), None);
    }

    #[test]
    fn overlong_and_overflowing_encodings_are_rejected() {
        assert!(read_varint(&[0x80; 11]).is_err());
        let mut overflow = [0xff; 10];
        overflow[9] = 0x02;
        assert!(read_varint(&overflow).is_err());
    }
}
