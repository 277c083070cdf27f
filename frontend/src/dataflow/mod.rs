//! Dataflow primitives for reactive state.
//!
//! - [`Relay`] carries events from the UI (or the server connection) to actors
//! - [`Actor`] owns one piece of state and mutates it from a single task
//! - [`Atom`] wraps an actor for small local UI values such as form fields
//!
//! Relays are named after their source and event, e.g.
//! `logout_pressed_relay` or `vendor_toggled_relay`.

pub mod actor;
pub mod atom;
pub mod relay;

pub use actor::Actor;
pub use atom::Atom;
pub use relay::{Relay, relay};
