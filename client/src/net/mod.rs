//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `feed_client` owns the browser side of the live feed socket. The wire
//! schema and the reconnect state machine live in the `feed` crate.

pub mod feed_client;
