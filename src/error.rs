//! SPLPv1 toolkit error types.
//!
//! Protocol violations are deliberately *not* represented here: the
//! validator collapses every deviation into an [`Invalid`] verdict with a
//! session reset, and [`Session::check`] reports the reason as a
//! [`Violation`] code. `SplpError` covers the tooling around the
//! validator (transcript parsing, report I/O).
//!
//! [`Invalid`]: crate::protocol::Verdict::Invalid
//! [`Session::check`]: crate::protocol::Session::check
//! [`Violation`]: crate::protocol::Violation

use thiserror::Error;

use crate::protocol::{Command, SessionState};

/// SPLPv1 toolkit errors.
#[derive(Error, Debug)]
pub enum SplpError {
    /// Sender tag that is not `A` or `B`.
    #[error("unknown peer {0:?} (expected \"A\" or \"B\")")]
    UnknownPeer(String),

    /// Line without the `<peer> <message>` shape.
    #[error("malformed line {0:?} (expected \"<peer> <message>\")")]
    MalformedLine(String),

    /// Error located at a transcript line.
    #[error("line {line}: {source}")]
    AtLine {
        /// 1-based line number in the transcript.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: Box<SplpError>,
    },

    /// State/pending pair that breaks the session invariant: a pending
    /// command exists iff the state is `WAITING_DATA`.
    #[error("state {state} cannot carry pending command {pending:?}")]
    InvalidPosition {
        /// Requested session state.
        state: SessionState,
        /// Requested pending command.
        pending: Option<Command>,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for toolkit operations.
pub type Result<T> = std::result::Result<T, SplpError>;
