//! Message vocabulary for the SPLPv1 validator.
//!
//! Defines the two peers, the ephemeral message they exchange, the
//! two-valued verdict, and the diagnostic violation codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SplpError;

/// Protocol participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Peer {
    /// The initiator. Opens the session and issues requests.
    A,
    /// The responder. Supplies the replies the initiator waits for.
    B,
}

impl Peer {
    /// The other participant.
    pub fn other(self) -> Self {
        match self {
            Peer::A => Peer::B,
            Peer::B => Peer::A,
        }
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Peer::A => f.write_str("A"),
            Peer::B => f.write_str("B"),
        }
    }
}

impl FromStr for Peer {
    type Err = SplpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Peer::A),
            "B" => Ok(Peer::B),
            other => Err(SplpError::UnknownPeer(other.to_string())),
        }
    }
}

/// One already-delimited protocol message tagged with its sender.
///
/// Ephemeral input: the validator never retains it past the call. The
/// text is the exact bytes as sent, line terminator excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Which peer sent the line.
    pub sender: Peer,
    /// Exact message text.
    pub text: String,
}

impl Message {
    /// Create a message from a sender and text.
    pub fn new(sender: Peer, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sender, self.text)
    }
}

impl FromStr for Message {
    type Err = SplpError;

    /// Parse the transcript shape `<peer> <message>`, splitting at the
    /// first space only. Everything after that space is kept verbatim,
    /// leading whitespace included.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sender, text) = s
            .split_once(' ')
            .ok_or_else(|| SplpError::MalformedLine(s.to_string()))?;
        Ok(Self {
            sender: sender.parse()?,
            text: text.to_string(),
        })
    }
}

/// Outcome of validating one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The message is legal in the current session state.
    Valid,
    /// Protocol violation; the session has been reset.
    Invalid,
}

impl Verdict {
    /// True for [`Verdict::Valid`].
    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str("VALID"),
            Verdict::Invalid => f.write_str("INVALID"),
        }
    }
}

/// Why a message was rejected.
///
/// Diagnostic only: every variant maps to the same [`Verdict::Invalid`]
/// outcome and the same reset to the initial state. Callers that only
/// need pass/fail use [`Session::validate`] and never see these.
///
/// [`Session::validate`]: crate::protocol::Session::validate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Violation {
    /// The message came from the peer whose turn it was not.
    WrongSender,
    /// No rule for this message text in the current state.
    UnexpectedMessage,
    /// `VERSION` reply without a well-formed digit run.
    MalformedVersion,
    /// Echo reply not matching `tag data tag` for the pending command.
    MalformedEcho,
    /// `B64:` reply failing the alphabet, padding, or length rules.
    MalformedPayload,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Violation::WrongSender => "message from the wrong peer",
            Violation::UnexpectedMessage => "unexpected message in this state",
            Violation::MalformedVersion => "malformed VERSION reply",
            Violation::MalformedEcho => "malformed command echo",
            Violation::MalformedPayload => "malformed B64 payload",
        };
        f.write_str(reason)
    }
}
