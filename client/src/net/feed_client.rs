//! Browser driver for the live feed socket.
//!
//! The driver executes the [`Command`]s produced by `feed::session::FeedSession`
//! against a real `web_sys::WebSocket` and a `gloo_timers` timeout, and
//! publishes the session into the `RwSignal<FeedState>` after every event so
//! the page re-renders.
//!
//! All socket logic is gated behind `#[cfg(feature = "hydrate")]` since it
//! requires a browser environment. URL resolution is plain Rust and tested
//! natively.
//!
//! OWNERSHIP
//! =========
//! Drivers live in a thread-local registry keyed by a `FeedHandle` id. The
//! handle is `Copy + Send`, so it can be captured by `on_cleanup`, while the
//! driver itself stays in `Rc<RefCell<_>>` on the browser thread. Each socket
//! holds its four lifecycle closures; releasing a socket detaches them before
//! closing, so a replaced socket can never deliver events again.
//!
//! ERROR HANDLING
//! ==============
//! Malformed frames and transport errors are logged and absorbed. Every
//! failure path ends in a close, which the session turns into a reconnect.

#[cfg(test)]
#[path = "feed_client_test.rs"]
mod feed_client_test;

#[cfg(feature = "hydrate")]
use std::cell::{Cell, RefCell};
#[cfg(feature = "hydrate")]
use std::collections::HashMap;
#[cfg(feature = "hydrate")]
use std::rc::Rc;

#[cfg(feature = "hydrate")]
use feed::session::{Attempt, Command, FeedSession, FrameOutcome};
#[cfg(feature = "hydrate")]
use leptos::prelude::{RwSignal, Update};
#[cfg(feature = "hydrate")]
use wasm_bindgen::JsCast;
#[cfg(feature = "hydrate")]
use wasm_bindgen::closure::Closure;

#[cfg(feature = "hydrate")]
use crate::state::feed::FeedState;

const FALLBACK_HOST: &str = "localhost";

/// Feed endpoint for a page served over `page_protocol` from `hostname`.
///
/// The feed always listens on [`feed::FEED_PORT`]; `https:` pages use `wss`.
pub fn feed_url(page_protocol: &str, hostname: &str) -> String {
    let scheme = if page_protocol.starts_with("https") { "wss" } else { "ws" };
    let host = hostname.trim();
    let host = if host.is_empty() { FALLBACK_HOST } else { host };
    if host.contains(':') && !host.starts_with('[') {
        // Bare IPv6 literal.
        format!("{scheme}://[{host}]:{}", feed::FEED_PORT)
    } else {
        format!("{scheme}://{host}:{}", feed::FEED_PORT)
    }
}

/// Feed endpoint derived from the current `window.location`.
#[cfg(feature = "hydrate")]
fn browser_feed_url() -> String {
    let location = web_sys::window().map(|w| w.location());
    let protocol = location
        .as_ref()
        .and_then(|l| l.protocol().ok())
        .unwrap_or_default();
    let hostname = location
        .as_ref()
        .and_then(|l| l.hostname().ok())
        .unwrap_or_default();
    feed_url(&protocol, &hostname)
}

/// Handle to a running feed driver.
///
/// Dropping the handle does nothing; call [`FeedHandle::teardown`] when the
/// owning view unmounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedHandle {
    id: u64,
}

#[cfg(feature = "hydrate")]
type SharedDriver = Rc<RefCell<FeedDriver>>;

#[cfg(feature = "hydrate")]
thread_local! {
    static DRIVERS: RefCell<HashMap<u64, SharedDriver>> = RefCell::new(HashMap::new());
    static NEXT_DRIVER_ID: Cell<u64> = const { Cell::new(0) };
}

/// One live socket plus the closures registered on it.
#[cfg(feature = "hydrate")]
struct FeedSocket {
    attempt: Attempt,
    socket: web_sys::WebSocket,
    _on_open: Closure<dyn FnMut(web_sys::Event)>,
    _on_message: Closure<dyn FnMut(web_sys::MessageEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
    _on_close: Closure<dyn FnMut(web_sys::CloseEvent)>,
}

#[cfg(feature = "hydrate")]
impl FeedSocket {
    /// Detach every callback, then close. Events already queued for this
    /// socket find no handler.
    fn release(self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);
        if let Err(e) = self.socket.close() {
            leptos::logging::warn!("feed {}: close failed: {e:?}", self.attempt);
        }
    }
}

#[cfg(feature = "hydrate")]
struct FeedDriver {
    id: u64,
    url: String,
    session: FeedSession,
    socket: Option<FeedSocket>,
    reconnect: Option<gloo_timers::callback::Timeout>,
    feed: RwSignal<FeedState>,
}

/// Start the live feed for the current page and return its handle.
///
/// Connects immediately; `feed` is updated on every state or buffer change.
#[cfg(feature = "hydrate")]
pub fn spawn_feed_client(feed: RwSignal<FeedState>) -> FeedHandle {
    let id = NEXT_DRIVER_ID.with(|next| {
        let id = next.get() + 1;
        next.set(id);
        id
    });
    let url = browser_feed_url();
    leptos::logging::log!("feed: connecting to {url}");

    let driver = Rc::new(RefCell::new(FeedDriver {
        id,
        url,
        session: FeedSession::new(),
        socket: None,
        reconnect: None,
        feed,
    }));
    DRIVERS.with(|drivers| drivers.borrow_mut().insert(id, Rc::clone(&driver)));

    let commands = driver.borrow_mut().session.start();
    run_commands(&driver, commands);
    FeedHandle { id }
}

impl FeedHandle {
    /// Close the socket and cancel any pending reconnect.
    ///
    /// After this returns no further connection attempt is made for this
    /// handle, even if a reconnect timer was armed.
    pub fn teardown(self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(driver) = DRIVERS.with(|drivers| drivers.borrow_mut().remove(&self.id)) else {
                return;
            };
            let commands = driver.borrow_mut().session.teardown();
            run_commands(&driver, commands);
            leptos::logging::log!("feed: torn down");
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self;
        }
    }
}

#[cfg(feature = "hydrate")]
fn lookup(id: u64) -> Option<SharedDriver> {
    DRIVERS.with(|drivers| drivers.borrow().get(&id).cloned())
}

/// Apply a session transition and execute whatever it asks for.
#[cfg(feature = "hydrate")]
fn dispatch(id: u64, event: impl FnOnce(&mut FeedSession) -> Vec<Command>) {
    let Some(driver) = lookup(id) else {
        return;
    };
    let commands = event(&mut driver.borrow_mut().session);
    run_commands(&driver, commands);
}

#[cfg(feature = "hydrate")]
fn run_commands(driver: &SharedDriver, commands: Vec<Command>) {
    for command in commands {
        match command {
            Command::Connect { attempt } => connect(driver, attempt),
            Command::ScheduleReconnect { attempt, delay } => schedule_reconnect(driver, attempt, delay),
            Command::CancelReconnect => {
                // Dropping a gloo Timeout clears the browser timer.
                if driver.borrow_mut().reconnect.take().is_some() {
                    leptos::logging::log!("feed: pending reconnect cancelled");
                }
            }
            Command::Close { attempt } => {
                let socket = driver.borrow_mut().socket.take();
                if let Some(socket) = socket {
                    leptos::logging::log!("feed {attempt}: closing");
                    socket.release();
                }
            }
        }
    }
    publish(driver);
}

#[cfg(feature = "hydrate")]
fn publish(driver: &SharedDriver) {
    let driver = driver.borrow();
    let session = &driver.session;
    driver.feed.maybe_update(|state| state.sync_from(session));
}

#[cfg(feature = "hydrate")]
fn connect(driver: &SharedDriver, attempt: Attempt) {
    let (id, url) = {
        let d = driver.borrow();
        (d.id, d.url.clone())
    };

    // Any previous socket is released before its replacement exists.
    if let Some(old) = driver.borrow_mut().socket.take() {
        old.release();
    }

    match open_socket(id, &url, attempt) {
        Ok(socket) => driver.borrow_mut().socket = Some(socket),
        Err(e) => {
            // Constructor failures never produce callbacks; synthesize the
            // error + close pair so the session retries like any other drop.
            leptos::logging::error!("feed {attempt}: WebSocket error: {e}");
            let mut d = driver.borrow_mut();
            d.session.on_error(attempt);
            let commands = d.session.on_close(attempt);
            drop(d);
            run_commands(driver, commands);
        }
    }
}

#[cfg(feature = "hydrate")]
fn open_socket(id: u64, url: &str, attempt: Attempt) -> Result<FeedSocket, String> {
    let socket = web_sys::WebSocket::new(url).map_err(|e| format!("{e:?}"))?;

    let on_open = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        leptos::logging::log!("feed {attempt}: connected");
        dispatch(id, |session| {
            session.on_open(attempt);
            Vec::new()
        });
    });

    let on_message = Closure::<dyn FnMut(web_sys::MessageEvent)>::new(move |ev: web_sys::MessageEvent| {
        let Some(text) = ev.data().as_string() else {
            leptos::logging::warn!("feed {attempt}: ignoring non-text frame");
            return;
        };
        dispatch(id, |session| {
            match session.on_frame(attempt, &text) {
                FrameOutcome::Appended { .. } => leptos::logging::log!("feed {attempt}: new message"),
                FrameOutcome::Rejected(e) => leptos::logging::error!("feed {attempt}: error parsing message: {e}"),
                FrameOutcome::Ignored => {}
            }
            Vec::new()
        });
    });

    let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        dispatch(id, |session| {
            if session.on_error(attempt) {
                leptos::logging::error!("feed {attempt}: WebSocket error ({})", ev.type_());
            }
            Vec::new()
        });
    });

    let on_close = Closure::<dyn FnMut(web_sys::CloseEvent)>::new(move |ev: web_sys::CloseEvent| {
        leptos::logging::warn!("feed {attempt}: connection closed (code {}, clean {})", ev.code(), ev.was_clean());
        dispatch(id, |session| session.on_close(attempt));
    });

    socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
    socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
    socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

    Ok(FeedSocket {
        attempt,
        socket,
        _on_open: on_open,
        _on_message: on_message,
        _on_error: on_error,
        _on_close: on_close,
    })
}

#[cfg(feature = "hydrate")]
fn schedule_reconnect(driver: &SharedDriver, attempt: Attempt, delay: std::time::Duration) {
    let id = driver.borrow().id;
    let delay_ms = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
    leptos::logging::log!("feed {attempt}: reconnecting in {delay_ms} ms");

    // The socket is gone; drop its closures now rather than at the next connect.
    if let Some(old) = driver.borrow_mut().socket.take() {
        old.release();
    }

    let timeout = gloo_timers::callback::Timeout::new(delay_ms, move || {
        dispatch(id, |session| session.on_reconnect_due(attempt));
    });
    driver.borrow_mut().reconnect = Some(timeout);
}
