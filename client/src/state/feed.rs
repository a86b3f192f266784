#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use feed::session::FeedSession;
use feed::{ChatMessage, ConnectionState, MessageBuffer};

/// Render-side snapshot of the live feed.
///
/// The feed driver owns the authoritative `FeedSession`; after every event it
/// copies the session into this struct so reactive views pick up the change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedState {
    pub connection: ConnectionState,
    pub messages: MessageBuffer,
}

impl FeedState {
    /// Copy connection state and buffer out of `session`.
    ///
    /// Returns `true` if anything changed.
    pub fn sync_from(&mut self, session: &FeedSession) -> bool {
        let mut changed = false;
        if self.connection != session.state() {
            self.connection = session.state();
            changed = true;
        }
        if self.messages != *session.buffer() {
            self.messages.clone_from(session.buffer());
            changed = true;
        }
        changed
    }

    /// Messages oldest to newest, ready for a keyed list.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.to_vec()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }
}
