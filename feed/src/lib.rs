//! Shared chat feed model for the live viewer.
//!
//! This crate owns the wire representation of a feed message, the bounded
//! buffer the viewer renders from, and the connection state machine in
//! [`session`]. Nothing here touches a socket or a timer, so the `client`
//! crate can drive it from the browser event loop and the tests can drive it
//! by hand.

pub mod session;

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Port the external feed listens on (`ws://<host>:8765`).
pub const FEED_PORT: u16 = 8765;

/// Number of messages the viewer keeps.
pub const BUFFER_CAPACITY: usize = 50;

/// Fixed delay between a close and the next connection attempt.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(2000);

/// Error returned by [`decode_message`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame was not a JSON object carrying all four string fields.
    #[error("invalid chat message frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// One chat message as delivered by the feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Render key. Assumed unique, never checked.
    pub id: String,
    /// Display name of the sender.
    pub author: String,
    /// Message body.
    pub content: String,
    /// Free-text language label, display only.
    pub language: String,
}

/// Decode one text frame into a [`ChatMessage`].
///
/// Unknown fields are ignored.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] when the frame is not valid JSON, is not an
/// object, or is missing (or mistypes) any of the four fields.
pub fn decode_message(text: &str) -> Result<ChatMessage, DecodeError> {
    Ok(serde_json::from_str(text)?)
}

/// Connectivity of the feed socket as shown by the indicator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionState {
    #[must_use]
    pub fn is_connected(self) -> bool {
        self == Self::Connected
    }
}

/// Arrival-ordered buffer of the most recent messages.
///
/// Holds at most `capacity` entries; pushing into a full buffer evicts the
/// oldest entry first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBuffer {
    items: VecDeque<ChatMessage>,
    capacity: usize,
}

impl MessageBuffer {
    /// Empty buffer with the viewer's default capacity of [`BUFFER_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(BUFFER_CAPACITY)
    }

    /// Empty buffer holding at most `capacity` messages (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { items: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append `message`, returning the evicted oldest entry if the buffer was full.
    pub fn push(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        let evicted = if self.items.len() >= self.capacity { self.items.pop_front() } else { None };
        self.items.push_back(message);
        evicted
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently received message.
    #[must_use]
    pub fn latest(&self) -> Option<&ChatMessage> {
        self.items.back()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ChatMessage> {
        self.items.iter()
    }

    /// Copy out the messages oldest to newest.
    #[must_use]
    pub fn to_vec(&self) -> Vec<ChatMessage> {
        self.items.iter().cloned().collect()
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a MessageBuffer {
    type Item = &'a ChatMessage;
    type IntoIter = std::collections::vec_deque::Iter<'a, ChatMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
