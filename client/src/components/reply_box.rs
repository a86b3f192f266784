//! Manual reply row. There is no outbound path yet, so sending is disabled.

#[cfg(test)]
#[path = "reply_box_test.rs"]
mod reply_box_test;

use leptos::prelude::*;

const REPLY_PLACEHOLDER: &str = "Type a manual reply (not connected yet)";

/// Text input plus a permanently disabled Send button.
///
/// The draft is kept locally so typing behaves normally; nothing reads it.
#[component]
pub fn ReplyBox() -> impl IntoView {
    let draft = RwSignal::new(String::new());

    view! {
        <div class="reply-box">
            <input
                class="reply-box__input"
                type="text"
                placeholder=REPLY_PLACEHOLDER
                prop:value=move || draft.get()
                on:input=move |ev| draft.set(event_target_value(&ev))
            />
            <button class="btn reply-box__send" disabled=true>
                "Send"
            </button>
        </div>
    }
}
