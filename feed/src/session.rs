//! Connection lifecycle for the live feed, without any I/O.
//!
//! DESIGN
//! ======
//! `FeedSession` consumes socket lifecycle events (open, frame, error, close),
//! reconnect timer expiry and teardown, and answers with [`Command`]s that a
//! driver executes against a real socket and timer. The browser driver lives
//! in `client::net::feed_client`.
//!
//! Each connection attempt is numbered. Events carry the attempt they belong
//! to, and events for any attempt other than the current one come from a
//! released socket and are dropped. That keeps exactly one live handle even
//! if an old socket still delivers a late callback.
//!
//! RECONNECT
//! =========
//! Every close schedules exactly one reconnect after a fixed delay. There is
//! no backoff growth and no attempt cap. Teardown cancels a pending
//! reconnect, closes the live socket, and makes every later event a no-op.

use std::fmt;
use std::time::Duration;

use crate::{ChatMessage, ConnectionState, DecodeError, MessageBuffer, RECONNECT_DELAY, decode_message};

/// Sequence number of a connection attempt. The first attempt is `#1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Attempt(u64);

impl Attempt {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side effect the driver must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Open a socket to the feed and tag its callbacks with `attempt`.
    Connect { attempt: Attempt },
    /// Arm a one-shot timer; when it fires call [`FeedSession::on_reconnect_due`].
    ScheduleReconnect { attempt: Attempt, delay: Duration },
    /// Disarm the pending reconnect timer.
    CancelReconnect,
    /// Detach callbacks from the socket for `attempt` and close it.
    Close { attempt: Attempt },
}

/// Result of feeding one inbound frame to the session.
#[derive(Debug)]
pub enum FrameOutcome {
    /// Frame decoded and appended. Carries the message evicted to make room.
    Appended { evicted: Option<ChatMessage> },
    /// Frame did not decode; buffer and state are untouched.
    Rejected(DecodeError),
    /// Frame belongs to a released socket or arrived after teardown.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Connecting,
    Open,
    ReconnectPending,
    Halted,
}

/// State machine behind the live feed view.
#[derive(Clone, Debug)]
pub struct FeedSession {
    state: ConnectionState,
    buffer: MessageBuffer,
    attempt: Attempt,
    phase: Phase,
    reconnect_delay: Duration,
}

impl FeedSession {
    /// Session with a 50-message buffer and the fixed 2000 ms reconnect delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(MessageBuffer::new())
    }

    #[must_use]
    pub fn with_buffer(buffer: MessageBuffer) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            buffer,
            attempt: Attempt::default(),
            phase: Phase::Idle,
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    #[must_use]
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    #[must_use]
    pub fn buffer(&self) -> &MessageBuffer {
        &self.buffer
    }

    /// Attempt number of the current (or most recent) socket.
    #[must_use]
    pub fn attempt(&self) -> Attempt {
        self.attempt
    }

    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        self.reconnect_delay
    }

    #[must_use]
    pub fn reconnect_pending(&self) -> bool {
        self.phase == Phase::ReconnectPending
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    /// Issue the first connection attempt. Later calls return nothing.
    pub fn start(&mut self) -> Vec<Command> {
        if self.phase != Phase::Idle {
            return Vec::new();
        }
        vec![self.begin_attempt()]
    }

    /// Socket for `attempt` finished its handshake.
    ///
    /// Returns `false` if the event was stale and ignored.
    pub fn on_open(&mut self, attempt: Attempt) -> bool {
        if !self.is_current(attempt) || self.phase != Phase::Connecting {
            return false;
        }
        self.phase = Phase::Open;
        self.state = ConnectionState::Connected;
        true
    }

    /// Text frame received on the socket for `attempt`.
    pub fn on_frame(&mut self, attempt: Attempt, text: &str) -> FrameOutcome {
        if !self.is_current(attempt) || self.phase != Phase::Open {
            return FrameOutcome::Ignored;
        }
        match decode_message(text) {
            Ok(message) => FrameOutcome::Appended { evicted: self.buffer.push(message) },
            Err(e) => FrameOutcome::Rejected(e),
        }
    }

    /// Transport error on the socket for `attempt`.
    ///
    /// Never changes state; the transport follows up with a close. Returns
    /// `false` if the event was stale and ignored.
    pub fn on_error(&mut self, attempt: Attempt) -> bool {
        self.is_current(attempt) && matches!(self.phase, Phase::Connecting | Phase::Open)
    }

    /// Socket for `attempt` closed, cleanly or not.
    pub fn on_close(&mut self, attempt: Attempt) -> Vec<Command> {
        if !self.is_current(attempt) || !matches!(self.phase, Phase::Connecting | Phase::Open) {
            return Vec::new();
        }
        self.state = ConnectionState::Disconnected;
        self.phase = Phase::ReconnectPending;
        vec![Command::ScheduleReconnect { attempt, delay: self.reconnect_delay }]
    }

    /// Reconnect timer armed after `attempt` closed has fired.
    pub fn on_reconnect_due(&mut self, attempt: Attempt) -> Vec<Command> {
        if !self.is_current(attempt) || self.phase != Phase::ReconnectPending {
            return Vec::new();
        }
        vec![self.begin_attempt()]
    }

    /// Stop the machine: cancel any pending reconnect and close any live socket.
    pub fn teardown(&mut self) -> Vec<Command> {
        let commands = match self.phase {
            Phase::Idle | Phase::Halted => Vec::new(),
            Phase::Connecting | Phase::Open => vec![Command::Close { attempt: self.attempt }],
            Phase::ReconnectPending => vec![Command::CancelReconnect],
        };
        self.phase = Phase::Halted;
        self.state = ConnectionState::Disconnected;
        commands
    }

    fn begin_attempt(&mut self) -> Command {
        self.attempt = self.attempt.next();
        self.phase = Phase::Connecting;
        Command::Connect { attempt: self.attempt }
    }

    fn is_current(&self, attempt: Attempt) -> bool {
        self.phase != Phase::Halted && attempt == self.attempt
    }
}

impl Default for FeedSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
