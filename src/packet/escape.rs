//! Byte stuffing of the body interior.
//!
//! Only the window between the four-byte sub-header magic and the last four
//! bytes of the body is escaped. Bytes outside of it are always sent as they are,
//! even if they collide with a control byte.

use super::{Error, Result};

/// Inserted before every reserved byte inside the escaping window.
pub const ESCAPE: u8 = 0x10;

const RESERVED: [u8; 4] = [0x01, 0x04, ESCAPE, 0x17];
const LEADING_UNESCAPED: usize = 4;
const TRAILING_UNESCAPED: usize = 4;

pub fn is_reserved(byte: u8) -> bool {
    RESERVED.contains(&byte)
}

/// Start (inclusive) and end (exclusive) of the escaping window. Empty for
/// bodies of eight bytes or less.
fn window(len: usize) -> (usize, usize) {
    let start = LEADING_UNESCAPED.min(len);
    let end = len.saturating_sub(TRAILING_UNESCAPED).max(start);
    (start, end)
}

pub fn escape_body(body: &[u8]) -> Vec<u8> {
    let (start, end) = window(body.len());
    let interior = &body[start..end];
    let reserved_count = interior.iter().filter(|&&b| is_reserved(b)).count();

    let mut escaped = Vec::with_capacity(body.len() + reserved_count);
    escaped.extend_from_slice(&body[..start]);
    for &byte in interior {
        if is_reserved(byte) {
            escaped.push(ESCAPE);
        }
        escaped.push(byte);
    }
    escaped.extend_from_slice(&body[end..]);
    escaped
}

/// Reverses [escape_body]. Any byte following an escape byte is taken verbatim,
/// whether it is reserved or not.
pub fn unescape_body(escaped: &[u8]) -> Result<Vec<u8>> {
    let (start, end) = window(escaped.len());

    let mut body = Vec::with_capacity(escaped.len());
    body.extend_from_slice(&escaped[..start]);
    let mut offset = start;
    while offset < end {
        let byte = escaped[offset];
        if byte == ESCAPE {
            // partner byte must be inside the window too
            if offset + 1 >= end {
                return Err(Error::MalformedEscape { offset });
            }
            body.push(escaped[offset + 1]);
            offset += 2;
        } else {
            body.push(byte);
            offset += 1;
        }
    }
    body.extend_from_slice(&escaped[end..]);
    Ok(body)
}
