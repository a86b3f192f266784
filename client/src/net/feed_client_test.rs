use super::*;

#[test]
fn feed_url_uses_ws_on_plain_http() {
    assert_eq!(feed_url("http:", "chat.example.com"), "ws://chat.example.com:8765");
}

#[test]
fn feed_url_uses_wss_on_https() {
    assert_eq!(feed_url("https:", "chat.example.com"), "wss://chat.example.com:8765");
}

#[test]
fn feed_url_falls_back_to_localhost() {
    assert_eq!(feed_url("", ""), "ws://localhost:8765");
    assert_eq!(feed_url("http:", "   "), "ws://localhost:8765");
}

#[test]
fn feed_url_brackets_bare_ipv6_hosts() {
    assert_eq!(feed_url("http:", "::1"), "ws://[::1]:8765");
    assert_eq!(feed_url("http:", "[::1]"), "ws://[::1]:8765");
}

#[test]
fn teardown_without_browser_is_a_noop() {
    FeedHandle { id: 1 }.teardown();
}
