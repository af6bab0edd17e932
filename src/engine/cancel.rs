//! Cross-thread cancellation with an interruptible timed wait.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

#[derive(Debug, Default)]
struct Shared {
    cancelled: Mutex<bool>,
    signal: Condvar,
}

/// Cloneable handle that stops a running game.
///
/// The engine checks it between turns and waits on it during automated
/// players' thinking delays, so cancelling wakes a sleeping engine
/// immediately instead of after the delay. A human seat blocked inside
/// `Controller::next_command` is not woken; the game stops once that
/// answer has been applied.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    shared: Arc<Shared>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every waiter. Idempotent.
    pub fn cancel(&self) {
        let mut cancelled = self.shared.cancelled.lock();
        *cancelled = true;
        self.shared.signal.notify_all();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.shared.cancelled.lock()
    }

    /// Sleep for `timeout` unless cancelled first.
    ///
    /// Returns `true` if the token is cancelled when the wait ends.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.shared.cancelled.lock();

        while !*cancelled {
            if self.shared.signal.wait_until(&mut cancelled, deadline).timed_out() {
                break;
            }
        }
        *cancelled
    }
}
