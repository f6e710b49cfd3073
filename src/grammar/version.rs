//! `VERSION <digits>` reply grammar.

use super::classify::is_digit;

/// Literal prefix of a version reply, including the single space.
pub const VERSION_PREFIX: &str = "VERSION ";

/// Validate a full `VERSION <digits>` message.
///
/// Valid iff the message starts with the exact `"VERSION "` prefix
/// (one space, no more) and the remainder is a non-empty run of digits
/// reaching end of string. No sign, no decimal point, no length bound.
///
/// `"VERSION 0"` and `"VERSION 00"` pass: the protocol documentation
/// says "integer (>0)" but the grammar has never enforced positivity,
/// and this validator reproduces the grammar as observed.
pub fn validate_version(message: &str) -> bool {
    let Some(rest) = message.strip_prefix(VERSION_PREFIX) else {
        return false;
    };
    !rest.is_empty() && rest.bytes().all(is_digit)
}
