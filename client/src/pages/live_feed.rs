//! Live feed page: connection indicator, recent messages, inert reply row.
//!
//! The page owns the feed driver for as long as it is mounted. Mounting
//! connects; unmounting tears the driver down, which closes the socket and
//! cancels a pending reconnect.

#[cfg(test)]
#[path = "live_feed_test.rs"]
mod live_feed_test;

use leptos::prelude::*;

use crate::components::connection_indicator::ConnectionIndicator;
use crate::components::message_card::MessageCard;
use crate::components::reply_box::ReplyBox;
use crate::state::feed::FeedState;

const EMPTY_PLACEHOLDER: &str = "Waiting for messages...";
const PAGE_HEADING: &str = "📺 Live Chat Viewer (Alesha)";

/// The live chat viewer.
#[component]
pub fn LiveFeedPage() -> impl IntoView {
    let feed = expect_context::<RwSignal<FeedState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let handle = crate::net::feed_client::spawn_feed_client(feed);
        on_cleanup(move || handle.teardown());
    }

    // Keep the newest card in view.
    Effect::new(move || {
        let _ = feed.with(|f| f.messages.latest().map(|m| m.id.clone()));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    view! {
        <main class="live-feed">
            <header class="live-feed__header">
                <h1 class="live-feed__title">{PAGE_HEADING}</h1>
                <ConnectionIndicator/>
            </header>

            <div class="live-feed__messages" node_ref=messages_ref>
                <MessageList feed=feed/>
            </div>

            <ReplyBox/>
        </main>
    }
}

/// Keyed list of message cards, or the empty placeholder.
#[component]
fn MessageList(feed: RwSignal<FeedState>) -> impl IntoView {
    view! {
        <Show
            when=move || feed.with(|f| !f.messages.is_empty())
            fallback=|| view! { <p class="live-feed__empty">{EMPTY_PLACEHOLDER}</p> }
        >
            <For
                each=move || feed.with(FeedState::messages)
                key=|message| message.id.clone()
                children=|message| view! { <MessageCard message=message/> }
            />
        </Show>
    }
}
