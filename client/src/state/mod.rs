//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State lives in plain structs wrapped in `RwSignal`s provided via context,
//! so components re-render whenever the driver publishes a change.

pub mod feed;
