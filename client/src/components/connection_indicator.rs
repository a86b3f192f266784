//! Connectivity indicator for the feed socket.

#[cfg(test)]
#[path = "connection_indicator_test.rs"]
mod connection_indicator_test;

use feed::ConnectionState;
use leptos::prelude::*;

use crate::state::feed::FeedState;

fn connection_dot_class(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Connected => "connection__dot connection__dot--connected",
        ConnectionState::Disconnected => "connection__dot connection__dot--disconnected",
    }
}

fn connection_label(state: ConnectionState) -> &'static str {
    match state {
        ConnectionState::Connected => "Connected",
        ConnectionState::Disconnected => "Disconnected",
    }
}

/// Dot + label reflecting the current `ConnectionState`.
#[component]
pub fn ConnectionIndicator() -> impl IntoView {
    let feed = expect_context::<RwSignal<FeedState>>();

    let dot_class = move || connection_dot_class(feed.with(|f| f.connection));
    let label = move || connection_label(feed.with(|f| f.connection));

    view! {
        <span class="connection" role="status">
            <span class=dot_class></span>
            {label}
        </span>
    }
}
