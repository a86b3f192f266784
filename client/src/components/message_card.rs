//! Card rendering a single feed message.

#[cfg(test)]
#[path = "message_card_test.rs"]
mod message_card_test;

use feed::ChatMessage;
use leptos::prelude::*;

/// Author, body and language label of one message.
#[component]
pub fn MessageCard(message: ChatMessage) -> impl IntoView {
    let ChatMessage { author, content, language, .. } = message;

    view! {
        <article class="message-card">
            <p class="message-card__author">
                <span class="message-card__marker" aria-hidden="true">"👤"</span>
                <span>{author}</span>
            </p>
            <p class="message-card__content">
                <span class="message-card__marker" aria-hidden="true">"💬"</span>
                <span>{content}</span>
            </p>
            <p class="message-card__language">
                <span class="message-card__marker" aria-hidden="true">"🌐"</span>
                <span>{language}</span>
            </p>
        </article>
    }
}
