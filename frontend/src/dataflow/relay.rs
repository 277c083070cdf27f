//! Event streaming over unbounded channels.

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use std::panic::Location;
use std::sync::{Arc, OnceLock};

/// Sending half of an event stream consumed by one actor.
///
/// Each relay must be sent from exactly one place in the code. Debug builds
/// remember the first call site and panic when a second one shows up; funnel
/// events through a helper (see `routing::announce`) when several triggers
/// produce the same event.
///
/// ```rust
/// let (vendor_toggled_relay, mut vendor_toggled_stream) = relay::<String>();
/// vendor_toggled_relay.send("zigma".to_string());
/// ```
#[derive(Clone, Debug)]
pub struct Relay<T: Clone + 'static> {
    sender: UnboundedSender<T>,
    origin: Origin,
}

#[derive(Debug, Clone)]
pub enum RelayError {
    /// The receiving actor is gone.
    ChannelClosed,
    MultipleEmitters {
        first: &'static Location<'static>,
        now: &'static Location<'static>,
    },
}

/// First call site that sent through a relay. Only tracked in debug builds.
#[derive(Clone, Debug, Default)]
struct Origin(Arc<OnceLock<&'static Location<'static>>>);

impl Origin {
    fn check(&self, now: &'static Location<'static>) -> Result<(), RelayError> {
        if !cfg!(debug_assertions) {
            return Ok(());
        }
        let first = *self.0.get_or_init(|| now);
        if first == now {
            Ok(())
        } else {
            Err(RelayError::MultipleEmitters { first, now })
        }
    }
}

impl<T: Clone + 'static> Relay<T> {
    pub fn new() -> (Self, UnboundedReceiver<T>) {
        let (sender, receiver) = unbounded();
        let relay = Relay {
            sender,
            origin: Origin::default(),
        };
        (relay, receiver)
    }

    /// Sends an event; it is dropped silently when the receiver is gone.
    #[track_caller]
    pub fn send(&self, value: T) {
        if let Err(error @ RelayError::MultipleEmitters { .. }) = self.try_send(value) {
            panic!("{error:?}");
        }
    }

    #[track_caller]
    pub fn try_send(&self, value: T) -> Result<(), RelayError> {
        self.origin.check(Location::caller())?;
        self.sender
            .unbounded_send(value)
            .map_err(|_| RelayError::ChannelClosed)
    }
}

pub fn relay<T: Clone + 'static>() -> (Relay<T>, UnboundedReceiver<T>) {
    Relay::new()
}
