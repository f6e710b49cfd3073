//! Session state machine for SPLPv1 conformance checking.
//!
//! One [`Session`] tracks one A-B conversation. Every inbound message
//! goes through [`Session::validate`] (or its diagnostic twin
//! [`Session::check`]), which looks up the legal message set for the
//! current state and sender, delegates character-level checking to the
//! grammars in [`crate::grammar`], and moves to the next state - or
//! resets to [`SessionState::Init`] on any deviation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::message::{Peer, Verdict, Violation};
use crate::error::SplpError;
use crate::grammar::{validate_b64, validate_echo, validate_version};

/// Protocol state of one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No conversation; waiting for `CONNECT` from A.
    Init,
    /// `CONNECT` seen; waiting for `CONNECT_OK` from B.
    Connecting,
    /// Established; A picks the next request.
    Connected,
    /// `GET_VER` sent; waiting for `VERSION <digits>` from B.
    WaitingVersion,
    /// An echo request sent; waiting for the tag echo from B.
    WaitingData,
    /// `GET_B64` sent; waiting for `B64: <payload>` from B.
    WaitingB64,
    /// `DISCONNECT` sent; waiting for `DISCONNECT_OK` from B.
    Disconnecting,
}

impl SessionState {
    /// The peer whose message is legal in this state.
    pub fn expected_sender(self) -> Peer {
        match self {
            SessionState::Init | SessionState::Connected => Peer::A,
            SessionState::Connecting
            | SessionState::WaitingVersion
            | SessionState::WaitingData
            | SessionState::WaitingB64
            | SessionState::Disconnecting => Peer::B,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Init => "INIT",
            SessionState::Connecting => "CONNECTING",
            SessionState::Connected => "CONNECTED",
            SessionState::WaitingVersion => "WAITING_VERSION",
            SessionState::WaitingData => "WAITING_DATA",
            SessionState::WaitingB64 => "WAITING_B64",
            SessionState::Disconnecting => "DISCONNECTING",
        };
        f.write_str(name)
    }
}

/// Echo request kinds A may issue while connected.
///
/// Each carries the literal tag the responder must echo back around the
/// data, and the closing tag must match the opening one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// `GET_DATA` request/echo tag.
    GetData,
    /// `GET_COMMAND` request/echo tag.
    GetCommand,
    /// `GET_FILE` request/echo tag.
    GetFile,
}

impl Command {
    /// The literal tag this command opens and its echo closes with.
    pub fn tag(self) -> &'static str {
        match self {
            Command::GetData => "GET_DATA",
            Command::GetCommand => "GET_COMMAND",
            Command::GetFile => "GET_FILE",
        }
    }

    fn from_request(message: &str) -> Option<Self> {
        match message {
            "GET_DATA" => Some(Command::GetData),
            "GET_COMMAND" => Some(Command::GetCommand),
            "GET_FILE" => Some(Command::GetFile),
            _ => None,
        }
    }
}

/// One SPLPv1 conversation.
///
/// Holds the current protocol state and the outstanding echo tag. All
/// mutation happens through [`validate`]/[`check`]; concurrent
/// conversations each own their own `Session` and never interfere.
///
/// [`validate`]: Session::validate
/// [`check`]: Session::check
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    pending: Option<Command>,
    messages: u64,
    accepted: u64,
    rejected: u64,
}

impl Session {
    /// Create a session in the initial state.
    pub fn new() -> Self {
        Self {
            state: SessionState::Init,
            pending: None,
            messages: 0,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Create a session already positioned at `state`, for harness use.
    ///
    /// `WaitingData` requires the command whose echo is outstanding;
    /// every other state requires `pending` to be `None`.
    pub fn resume(state: SessionState, pending: Option<Command>) -> Result<Self, SplpError> {
        if pending.is_some() != (state == SessionState::WaitingData) {
            return Err(SplpError::InvalidPosition { state, pending });
        }
        Ok(Self {
            state,
            pending,
            ..Self::new()
        })
    }

    /// Current protocol state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The command whose echo is outstanding. `Some` iff the state is
    /// [`SessionState::WaitingData`].
    pub fn pending_command(&self) -> Option<Command> {
        self.pending
    }

    /// Validate one message and advance the state machine.
    ///
    /// Always returns a verdict and always leaves the session in a
    /// well-defined state: the next state from the transition table on
    /// success, [`SessionState::Init`] with no pending command on any
    /// violation.
    pub fn validate(&mut self, sender: Peer, message: &str) -> Verdict {
        match self.check(sender, message) {
            Ok(_) => Verdict::Valid,
            Err(_) => Verdict::Invalid,
        }
    }

    /// Like [`Session::validate`], but rejections carry a reason code.
    ///
    /// The pass/fail outcome and the reset behavior are identical to
    /// `validate`; the [`Violation`] exists for diagnostics only. On
    /// success the new state is returned.
    pub fn check(&mut self, sender: Peer, message: &str) -> Result<SessionState, Violation> {
        self.messages += 1;
        match self.step(sender, message) {
            Ok((state, pending)) => {
                self.accepted += 1;
                tracing::debug!(
                    "accepted {:?} from {}: {} -> {}",
                    message,
                    sender,
                    self.state,
                    state
                );
                self.state = state;
                self.pending = pending;
                Ok(state)
            },
            Err(violation) => {
                self.rejected += 1;
                tracing::debug!(
                    "rejected {:?} from {} in {}: {}; session reset",
                    message,
                    sender,
                    self.state,
                    violation
                );
                self.state = SessionState::Init;
                self.pending = None;
                Err(violation)
            },
        }
    }

    /// Manually reset to the initial state, dropping any pending command.
    pub fn reset(&mut self) {
        self.state = SessionState::Init;
        self.pending = None;
    }

    /// Transition lookup. Pure: the caller applies the result.
    fn step(
        &self,
        sender: Peer,
        message: &str,
    ) -> Result<(SessionState, Option<Command>), Violation> {
        use SessionState::{
            Connected, Connecting, Disconnecting, Init, WaitingB64, WaitingData, WaitingVersion,
        };

        if sender != self.state.expected_sender() {
            return Err(Violation::WrongSender);
        }

        match self.state {
            Init => match message {
                "CONNECT" => Ok((Connecting, None)),
                _ => Err(Violation::UnexpectedMessage),
            },
            Connecting => match message {
                "CONNECT_OK" => Ok((Connected, None)),
                _ => Err(Violation::UnexpectedMessage),
            },
            Connected => {
                if let Some(command) = Command::from_request(message) {
                    Ok((WaitingData, Some(command)))
                } else {
                    match message {
                        "GET_VER" => Ok((WaitingVersion, None)),
                        "GET_B64" => Ok((WaitingB64, None)),
                        "DISCONNECT" => Ok((Disconnecting, None)),
                        _ => Err(Violation::UnexpectedMessage),
                    }
                }
            },
            WaitingVersion => {
                if validate_version(message) {
                    Ok((Connected, None))
                } else {
                    Err(Violation::MalformedVersion)
                }
            },
            WaitingData => {
                // The pending invariant makes this Some; the fallback
                // keeps the generic reject path for a state that should
                // never be reached without it.
                let tag = self
                    .pending
                    .map(Command::tag)
                    .ok_or(Violation::UnexpectedMessage)?;
                if validate_echo(message, tag) {
                    Ok((Connected, None))
                } else {
                    Err(Violation::MalformedEcho)
                }
            },
            WaitingB64 => {
                if validate_b64(message) {
                    Ok((Connected, None))
                } else {
                    Err(Violation::MalformedPayload)
                }
            },
            Disconnecting => match message {
                "DISCONNECT_OK" => Ok((Init, None)),
                _ => Err(Violation::UnexpectedMessage),
            },
        }
    }

    /// Counters for this session.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            messages: self.messages,
            accepted: self.accepted,
            rejected: self.rejected,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation counters for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Messages validated.
    pub messages: u64,
    /// Messages accepted.
    pub accepted: u64,
    /// Messages rejected (each rejection also reset the session).
    pub rejected: u64,
}

impl SessionStats {
    /// Fraction of messages accepted. A fresh session counts as 1.0.
    pub fn acceptance_rate(&self) -> f64 {
        if self.messages == 0 {
            1.0
        } else {
            self.accepted as f64 / self.messages as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> Session {
        let mut session = Session::new();
        assert_eq!(session.validate(Peer::A, "CONNECT"), Verdict::Valid);
        assert_eq!(session.validate(Peer::B, "CONNECT_OK"), Verdict::Valid);
        session
    }

    #[test]
    fn test_handshake_transitions() {
        let mut session = Session::new();
        assert_eq!(session.state(), SessionState::Init);

        assert_eq!(session.check(Peer::A, "CONNECT"), Ok(SessionState::Connecting));
        assert_eq!(
            session.check(Peer::B, "CONNECT_OK"),
            Ok(SessionState::Connected)
        );
    }

    #[test]
    fn test_wrong_sender_is_reported() {
        let mut session = Session::new();
        assert_eq!(
            session.check(Peer::B, "CONNECT"),
            Err(Violation::WrongSender)
        );
        assert_eq!(session.state(), SessionState::Init);

        let mut session = connected();
        assert_eq!(
            session.check(Peer::B, "GET_VER"),
            Err(Violation::WrongSender)
        );
        assert_eq!(session.state(), SessionState::Init);
    }

    #[test]
    fn test_pending_command_tracks_waiting_data() {
        let mut session = connected();
        assert_eq!(session.pending_command(), None);

        assert_eq!(session.validate(Peer::A, "GET_COMMAND"), Verdict::Valid);
        assert_eq!(session.state(), SessionState::WaitingData);
        assert_eq!(session.pending_command(), Some(Command::GetCommand));

        assert_eq!(
            session.validate(Peer::B, "GET_COMMAND x GET_COMMAND"),
            Verdict::Valid
        );
        assert_eq!(session.state(), SessionState::Connected);
        assert_eq!(session.pending_command(), None);
    }

    #[test]
    fn test_echo_must_use_opening_tag() {
        let mut session = connected();
        session.validate(Peer::A, "GET_DATA");

        // Well-formed echo of the wrong tag still resets.
        assert_eq!(
            session.check(Peer::B, "GET_FILE x GET_FILE"),
            Err(Violation::MalformedEcho)
        );
        assert_eq!(session.state(), SessionState::Init);
        assert_eq!(session.pending_command(), None);
    }

    #[test]
    fn test_every_rejection_resets() {
        let cases: &[(&[(Peer, &str)], Peer, &str)] = &[
            (&[], Peer::A, "CONNEC"),
            (&[(Peer::A, "CONNECT")], Peer::B, "CONNECT_NO"),
            (
                &[(Peer::A, "CONNECT"), (Peer::B, "CONNECT_OK")],
                Peer::A,
                "GET_VERSION",
            ),
        ];
        for (setup, sender, bad) in cases {
            let mut session = Session::new();
            for (peer, text) in *setup {
                assert_eq!(session.validate(*peer, text), Verdict::Valid);
            }
            assert_eq!(session.validate(*sender, bad), Verdict::Invalid);
            assert_eq!(session.state(), SessionState::Init);
            assert_eq!(session.pending_command(), None);
            // Recovery: a fresh CONNECT is accepted immediately.
            assert_eq!(session.validate(Peer::A, "CONNECT"), Verdict::Valid);
        }
    }

    #[test]
    fn test_disconnect_round_trip() {
        let mut session = connected();
        assert_eq!(session.validate(Peer::A, "DISCONNECT"), Verdict::Valid);
        assert_eq!(session.state(), SessionState::Disconnecting);
        assert_eq!(session.validate(Peer::B, "DISCONNECT_OK"), Verdict::Valid);
        assert_eq!(session.state(), SessionState::Init);

        // The session is reusable after a clean shutdown.
        assert_eq!(session.validate(Peer::A, "CONNECT"), Verdict::Valid);
    }

    #[test]
    fn test_resume_enforces_pending_invariant() {
        assert!(Session::resume(SessionState::WaitingData, Some(Command::GetFile)).is_ok());
        assert!(Session::resume(SessionState::Connected, None).is_ok());
        assert!(Session::resume(SessionState::WaitingData, None).is_err());
        assert!(Session::resume(SessionState::Connected, Some(Command::GetData)).is_err());
    }

    #[test]
    fn test_stats_counters() {
        let mut session = connected();
        session.validate(Peer::A, "NOPE");
        session.validate(Peer::A, "CONNECT");

        let stats = session.stats();
        assert_eq!(stats.messages, 4);
        assert_eq!(stats.accepted, 3);
        assert_eq!(stats.rejected, 1);
        assert!((stats.acceptance_rate() - 0.75).abs() < f64::EPSILON);

        let fresh = Session::new().stats();
        assert!((fresh.acceptance_rate() - 1.0).abs() < f64::EPSILON);
    }
}
