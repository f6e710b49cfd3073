//! `<TAG> <data> <TAG>` echo reply grammar.

use super::classify::is_data_char;

/// Validate a command echo against the tag that opened the exchange.
///
/// The message must be exactly `tag + " " + data + " " + tag`, where
/// `data` is a possibly empty run of data-alphabet bytes (lowercase
/// letters, digits, `'.'`). The data scan is greedy: it stops at the
/// first byte outside the alphabet, and from that point the remainder
/// must be one space, the closing tag, and end of string. Trailing
/// content after the closing tag is rejected.
///
/// The closing tag must equal the opening one; echoing a different
/// (even well-formed) tag is a mismatch the caller treats like any
/// other malformed reply.
pub fn validate_echo(message: &str, tag: &str) -> bool {
    let Some(rest) = message
        .strip_prefix(tag)
        .and_then(|r| r.strip_prefix(' '))
    else {
        return false;
    };

    // Greedy data scan; the stop index is a char boundary because
    // everything before it is ASCII.
    let bytes = rest.as_bytes();
    let stop = bytes
        .iter()
        .position(|&b| !is_data_char(b))
        .unwrap_or(bytes.len());

    rest[stop..].strip_prefix(' ') == Some(tag)
}
