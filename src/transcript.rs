//! Scripted-conversation harness.
//!
//! A transcript is the textual form of one conversation: one
//! `<peer> <message>` line per protocol message, in arrival order.
//! This module parses transcripts and plays them through a [`Session`],
//! standing in for the transport layer that would normally feed
//! already-delimited lines to the validator.
//!
//! ```text
//! # handshake, one query, shutdown
//! A CONNECT
//! B CONNECT_OK
//! A GET_DATA
//! B GET_DATA a1.b GET_DATA
//! A DISCONNECT
//! B DISCONNECT_OK
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplpError};
use crate::protocol::{Message, Peer, Session, SessionState, Verdict, Violation};

/// A parsed transcript: one message per non-comment line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    line: usize,
    message: Message,
}

impl Transcript {
    /// Parse transcript text.
    ///
    /// Blank lines and lines starting with `#` are skipped; every other
    /// line must have the `<peer> <message>` shape. The message text is
    /// kept verbatim - no trimming beyond the line terminator.
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in input.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() || raw.starts_with('#') {
                continue;
            }
            let message = raw.parse().map_err(|e| SplpError::AtLine {
                line,
                source: Box::new(e),
            })?;
            entries.push(Entry { line, message });
        }
        Ok(Self { entries })
    }

    /// Number of protocol messages in the transcript.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the transcript carries no protocol messages.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The parsed messages, in transcript order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().map(|e| &e.message)
    }

    /// Play every line through `session`, in order, and report per-line
    /// verdicts. The session is left in whatever state the last line
    /// put it in.
    pub fn run(&self, session: &mut Session) -> TranscriptReport {
        let mut lines = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let result = session.check(entry.message.sender, &entry.message.text);
            lines.push(LineReport {
                line: entry.line,
                sender: entry.message.sender,
                text: entry.message.text.clone(),
                verdict: match result {
                    Ok(_) => Verdict::Valid,
                    Err(_) => Verdict::Invalid,
                },
                violation: result.err(),
                state: session.state(),
            });
        }
        TranscriptReport { lines }
    }
}

/// Outcome of one transcript line, with the state it left behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineReport {
    /// 1-based line number in the transcript source.
    pub line: usize,
    /// Sending peer.
    pub sender: Peer,
    /// Exact message text.
    pub text: String,
    /// Verdict for this line.
    pub verdict: Verdict,
    /// Rejection reason, when the verdict is `INVALID`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<Violation>,
    /// Session state after this line.
    pub state: SessionState,
}

/// Outcome of playing one transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptReport {
    /// Per-line outcomes, in transcript order.
    pub lines: Vec<LineReport>,
}

impl TranscriptReport {
    /// Number of rejected lines.
    pub fn invalid_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.verdict == Verdict::Invalid)
            .count()
    }

    /// True when every line was accepted.
    pub fn is_conformant(&self) -> bool {
        self.invalid_count() == 0
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
