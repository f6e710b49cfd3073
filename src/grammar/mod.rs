//! Per-message grammars for SPLPv1 replies.
//!
//! Each validator is a pure function over one already-delimited message
//! string. They share the byte classifiers in [`classify`] and all
//! preserve the same greedy-stop shape: strip an exact literal prefix,
//! scan while bytes are in the relevant alphabet, stop at the first
//! byte that is not, and require the fixed suffix (if any) to follow
//! immediately and reach end of string.
//!
//! The state machine in [`crate::protocol`] decides *which* grammar a
//! message must satisfy; these functions only answer whether it does.

pub mod classify;

mod b64;
mod echo;
mod version;

pub use b64::{validate_b64, B64_PREFIX};
pub use echo::validate_echo;
pub use version::{validate_version, VERSION_PREFIX};
