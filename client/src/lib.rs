//! # client
//!
//! Leptos + WASM frontend for the live chat viewer.
//!
//! The page subscribes to the external chat feed over a WebSocket, keeps the
//! most recent messages in a bounded buffer (see the `feed` crate), and
//! renders them with a connectivity indicator. The server crate renders the
//! same `App` for SSR and this crate hydrates it in the browser.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;

/// WASM entry point: install logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
