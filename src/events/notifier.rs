//! Event subscribers.
//!
//! Anything implementing `Notifier` can observe a game: a closure, an
//! `mpsc::Sender`, the shared `EventLog`, or the `TracingNotifier`. The
//! engine fans each event out through an `EventBus`, in subscription order.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use super::GameEvent;

/// Receives every event the engine emits.
pub trait Notifier: Send {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> Notifier for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn notify(&mut self, event: &GameEvent) {
        self(event);
    }
}

impl Notifier for Sender<GameEvent> {
    /// A dropped receiver means nobody is listening any more; the game goes on.
    fn notify(&mut self, event: &GameEvent) {
        let _ = self.send(event.clone());
    }
}

/// Shared, cloneable record of every event.
///
/// Clone it before subscribing and read it back after the game.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Count events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: &GameEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Logs every event as a `debug` record.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, event: &GameEvent) {
        debug!(?event, "{event}");
    }
}

/// Ordered fan-out to every subscriber.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn Notifier>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, notifier: impl Notifier + 'static) {
        self.subscribers.push(Box::new(notifier));
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn publish(&mut self, event: &GameEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.notify(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
