//! Outbound game events.
//!
//! The engine never prints or renders anything. It emits typed
//! `GameEvent`s; views, loggers and tests subscribe through `Notifier`.

mod event;
mod notifier;

pub use event::GameEvent;
pub use notifier::{EventBus, EventLog, Notifier, TracingNotifier};
