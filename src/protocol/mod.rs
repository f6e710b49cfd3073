//! SPLPv1 session state machine and message vocabulary.
//!
//! SPLPv1 is a plain-text request/reply protocol between an initiator
//! (A) and a responder (B). This module holds the conformance state
//! machine: per message it answers [`Valid`] or [`Invalid`], and any
//! deviation resets the conversation to its initial state.
//!
//! # State Machine
//!
//! | State             | Sender | Message                  | Next state        |
//! |-------------------|--------|--------------------------|-------------------|
//! | `Init`            | A      | `CONNECT`                | `Connecting`      |
//! | `Connecting`      | B      | `CONNECT_OK`             | `Connected`       |
//! | `Connected`       | A      | `GET_VER`                | `WaitingVersion`  |
//! | `Connected`       | A      | `GET_DATA`               | `WaitingData`     |
//! | `Connected`       | A      | `GET_COMMAND`            | `WaitingData`     |
//! | `Connected`       | A      | `GET_FILE`               | `WaitingData`     |
//! | `Connected`       | A      | `GET_B64`                | `WaitingB64`      |
//! | `Connected`       | A      | `DISCONNECT`             | `Disconnecting`   |
//! | `WaitingVersion`  | B      | `VERSION <digits>`       | `Connected`       |
//! | `WaitingData`     | B      | `<tag> <data> <tag>`     | `Connected`       |
//! | `WaitingB64`      | B      | `B64: <payload>`         | `Connected`       |
//! | `Disconnecting`   | B      | `DISCONNECT_OK`          | `Init`            |
//!
//! Control messages match exactly; the three reply grammars live in
//! [`crate::grammar`]. The echo tag in `WaitingData` must equal the tag
//! of the request that opened the exchange ([`Session::pending_command`]).
//!
//! Any other (state, sender, message) triple is a protocol violation.
//! There is a single violation outcome: verdict [`Invalid`], state reset
//! to `Init`, pending command cleared. Malformed payloads and
//! out-of-sequence messages are deliberately indistinguishable in the
//! verdict; [`Session::check`] reports a [`Violation`] reason code for
//! diagnostics.
//!
//! [`Valid`]: Verdict::Valid
//! [`Invalid`]: Verdict::Invalid

mod message;
mod session;

pub use message::{Message, Peer, Verdict, Violation};
pub use session::{Command, Session, SessionState, SessionStats};

/// Protocol name and revision this crate validates.
pub const PROTOCOL_NAME: &str = "SPLPv1";
