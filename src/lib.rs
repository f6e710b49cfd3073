//! # SPLPv1 Conformance Validator
//!
//! Validates a bidirectional exchange of plain-text protocol messages
//! between an initiator (A) and a responder (B) against the fixed
//! SPLPv1 session grammar. The crate is a conformance checker, not a
//! transport: messages arrive as already-delimited strings tagged with
//! their sender, and each one gets a two-valued verdict.
//!
//! ## Protocol Overview
//!
//! ```text
//! A                                B
//! |-------- CONNECT ------------->|        Init -> Connecting
//! |<------- CONNECT_OK -----------|        Connecting -> Connected
//! |-------- GET_VER ------------->|        Connected -> WaitingVersion
//! |<------- VERSION 2 ------------|        WaitingVersion -> Connected
//! |-------- GET_DATA ------------>|        Connected -> WaitingData
//! |<--- GET_DATA a1.b GET_DATA ---|        WaitingData -> Connected
//! |-------- GET_B64 ------------->|        Connected -> WaitingB64
//! |<------- B64: SGVsbG8= --------|        WaitingB64 -> Connected
//! |-------- DISCONNECT ---------->|        Connected -> Disconnecting
//! |<------- DISCONNECT_OK --------|        Disconnecting -> Init
//! ```
//!
//! Any deviation - wrong sender, unknown message, malformed reply -
//! yields [`Verdict::Invalid`] and resets the session to `Init`, after
//! which a fresh `CONNECT` is accepted again. Violations are never
//! fatal: validation always completes with a verdict.
//!
//! ## Quick Start
//!
//! ```rust
//! use splp::{Peer, Session, Verdict};
//!
//! let mut session = Session::new();
//! assert_eq!(session.validate(Peer::A, "CONNECT"), Verdict::Valid);
//! assert_eq!(session.validate(Peer::B, "CONNECT_OK"), Verdict::Valid);
//! assert_eq!(session.validate(Peer::A, "GET_VER"), Verdict::Valid);
//! assert_eq!(session.validate(Peer::B, "VERSION 2"), Verdict::Valid);
//!
//! // Out-of-sequence message: rejected, session reset.
//! assert_eq!(session.validate(Peer::B, "VERSION 2"), Verdict::Invalid);
//! assert_eq!(session.validate(Peer::A, "CONNECT"), Verdict::Valid);
//! ```
//!
//! ## Modules
//!
//! - [`protocol`]: session state machine and message vocabulary
//! - [`grammar`]: the per-message grammars (version, echo, base64)
//! - [`transcript`]: scripted-conversation harness for tests and the CLI
//! - [`error`]: tooling error types
//!
//! Each conversation owns its own [`Session`]; there is no process-wide
//! state, so independent sessions can be validated concurrently as long
//! as each one is driven by a single caller at a time.

pub mod error;
pub mod grammar;
pub mod protocol;
pub mod transcript;

// Re-exports for convenience
pub use error::{Result, SplpError};
pub use protocol::{
    Command, Message, Peer, Session, SessionState, SessionStats, Verdict, Violation,
    PROTOCOL_NAME,
};
pub use transcript::{LineReport, Transcript, TranscriptReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
