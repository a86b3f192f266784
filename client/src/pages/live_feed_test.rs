use super::*;

use feed::session::FeedSession;

fn render(state: FeedState) -> String {
    Owner::new().with(|| {
        let feed = RwSignal::new(state);
        view! { <MessageList feed=feed/> }.to_html()
    })
}

fn state_after(frames: &[&str]) -> FeedState {
    let mut session = FeedSession::new();
    session.start();
    let attempt = session.attempt();
    session.on_open(attempt);
    for frame in frames {
        session.on_frame(attempt, frame);
    }
    let mut state = FeedState::default();
    state.sync_from(&session);
    state
}

#[test]
fn empty_feed_shows_waiting_placeholder() {
    let html = render(FeedState::default());
    assert!(html.contains(EMPTY_PLACEHOLDER));
    assert!(!html.contains("message-card"));
}

#[test]
fn single_frame_renders_one_card() {
    let html = render(state_after(&[r#"{"id":"1","author":"a","content":"hi","language":"en"}"#]));
    assert_eq!(html.matches(r#"class="message-card""#).count(), 1);
    assert!(html.contains(">a<"));
    assert!(html.contains(">hi<"));
    assert!(!html.contains(EMPTY_PLACEHOLDER));
}

#[test]
fn malformed_frame_renders_nothing_new() {
    let html = render(state_after(&["{not json"]));
    assert!(html.contains(EMPTY_PLACEHOLDER));
}

#[test]
fn cards_render_in_arrival_order() {
    let html = render(state_after(&[
        r#"{"id":"1","author":"first","content":"one","language":"en"}"#,
        r#"{"id":"2","author":"second","content":"two","language":"en"}"#,
    ]));
    let first = html.find(">first<").expect("first card");
    let second = html.find(">second<").expect("second card");
    assert!(first < second);
}

#[test]
fn page_renders_heading_indicator_and_reply_box() {
    let html = Owner::new().with(|| {
        provide_context(RwSignal::new(FeedState::default()));
        view! { <LiveFeedPage/> }.to_html()
    });
    assert!(html.contains(PAGE_HEADING));
    assert!(html.contains("Disconnected"));
    assert!(html.contains(EMPTY_PLACEHOLDER));
    assert!(html.contains("reply-box"));
}
