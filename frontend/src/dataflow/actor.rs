//! Single-value actor.

use std::future::Future;
use std::rc::Rc;
use zoon::{Mutable, Signal, Task, TaskHandle};

/// Owns a piece of state and mutates it only from its processor task.
///
/// The processor usually loops over relay streams with `futures::select!`.
/// It may await timers and the server connection, which are not `Send` in
/// the browser, so the future carries no `Send` bound.
///
/// ```rust
/// let (tick_relay, mut tick_stream) = relay::<()>();
/// let ticks = Actor::new(0u64, async move |state| {
///     while tick_stream.next().await.is_some() {
///         state.update_mut(|count| *count += 1);
///     }
/// });
/// ```
#[derive(Clone, Debug)]
pub struct Actor<T: Clone + 'static> {
    state: Mutable<T>,
    _processor: Rc<TaskHandle>,
}

impl<T: Clone + 'static> Actor<T> {
    pub fn new<Fut>(initial: T, processor: impl FnOnce(Mutable<T>) -> Fut) -> Self
    where
        Fut: Future<Output = ()> + 'static,
    {
        let state = Mutable::new(initial);
        let handle = Task::start_droppable(processor(state.clone()));
        Self {
            state,
            _processor: Rc::new(handle),
        }
    }

    pub fn signal(&self) -> impl Signal<Item = T> + use<T> {
        self.state.signal_cloned()
    }

    /// Current value, for event handlers that must read state once.
    pub(crate) fn get_cloned(&self) -> T {
        self.state.get_cloned()
    }
}
