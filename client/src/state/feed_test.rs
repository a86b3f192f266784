use super::*;

const HELLO: &str = r#"{"id":"1","author":"a","content":"hi","language":"en"}"#;

fn open_session() -> (FeedSession, feed::session::Attempt) {
    let mut session = FeedSession::new();
    session.start();
    let attempt = session.attempt();
    session.on_open(attempt);
    (session, attempt)
}

// =============================================================
// FeedState defaults
// =============================================================

#[test]
fn feed_state_default_is_disconnected_and_empty() {
    let state = FeedState::default();
    assert_eq!(state.connection, ConnectionState::Disconnected);
    assert!(!state.is_connected());
    assert!(state.messages().is_empty());
}

// =============================================================
// sync_from
// =============================================================

#[test]
fn sync_from_picks_up_connection_and_messages() {
    let (mut session, attempt) = open_session();
    session.on_frame(attempt, HELLO);

    let mut state = FeedState::default();
    assert!(state.sync_from(&session));
    assert!(state.is_connected());

    let messages = state.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].author, "a");
    assert_eq!(messages[0].content, "hi");
}

#[test]
fn sync_from_reports_no_change_for_rejected_frame() {
    let (mut session, attempt) = open_session();
    let mut state = FeedState::default();
    state.sync_from(&session);

    session.on_frame(attempt, "garbage");
    assert!(!state.sync_from(&session));
}

#[test]
fn sync_from_tracks_disconnect() {
    let (mut session, attempt) = open_session();
    let mut state = FeedState::default();
    state.sync_from(&session);

    session.on_close(attempt);
    assert!(state.sync_from(&session));
    assert_eq!(state.connection, ConnectionState::Disconnected);
}
