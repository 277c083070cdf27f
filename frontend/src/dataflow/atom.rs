//! Local UI state.

use crate::dataflow::{Actor, Relay, relay};
use futures::StreamExt;
use zoon::Signal;

/// Settable value owned by a single view, e.g. a login form field.
#[derive(Clone, Debug)]
pub struct Atom<T: Clone + PartialEq + 'static> {
    value: Actor<T>,
    value_changed_relay: Relay<T>,
}

impl<T: Clone + PartialEq + 'static> Atom<T> {
    pub fn new(initial: T) -> Self {
        let (value_changed_relay, mut value_changed_stream) = relay();
        let value = Actor::new(initial, async move |state| {
            while let Some(next) = value_changed_stream.next().await {
                state.set_neq(next);
            }
        });
        Self {
            value,
            value_changed_relay,
        }
    }

    pub fn set(&self, value: T) {
        self.value_changed_relay.send(value);
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.value.signal()
    }

    pub fn get_cloned(&self) -> T {
        self.value.get_cloned()
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Atom<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
