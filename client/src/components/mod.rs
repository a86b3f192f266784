//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render pieces of the live feed page. Only the connection
//! indicator reads shared state from context; the rest take props.

pub mod connection_indicator;
pub mod message_card;
pub mod reply_box;
