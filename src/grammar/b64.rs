//! `B64: <payload>` reply grammar.
//!
//! This is a structural check of the classic base64 shape, not a
//! decoder: an alphabet run, at most two `'='` padding bytes, nothing
//! after them, and a total length that is a multiple of four.

use super::classify::is_base64_char;

/// Literal prefix of a base64 reply: tag, colon, one space.
pub const B64_PREFIX: &str = "B64: ";

/// Validate a full `B64: <payload>` message.
///
/// The payload is scanned greedily while bytes are in the base64
/// alphabet. At the stopping point, one `'='` may be consumed, then a
/// second; whatever follows the consumed run must be end of string.
/// With `n` the number of bytes consumed (alphabet plus padding), the
/// payload is valid only if `n % 4 == 0`. An empty payload (`n == 0`)
/// is valid.
pub fn validate_b64(message: &str) -> bool {
    let Some(payload) = message.strip_prefix(B64_PREFIX) else {
        return false;
    };

    let bytes = payload.as_bytes();
    let mut n = bytes
        .iter()
        .position(|&b| !is_base64_char(b))
        .unwrap_or(bytes.len());

    if bytes.get(n) == Some(&b'=') {
        n += 1;
        if bytes.get(n) == Some(&b'=') {
            n += 1;
        }
    }

    // No interior non-alphabet bytes, no trailing content after padding.
    n == bytes.len() && n % 4 == 0
}
