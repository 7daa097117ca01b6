//! Cooperative cancellation shared between threads

use crate::error::Result;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::info;

/// Cancellation token backed by a mutex and condition variable.
///
/// Clones share state: cancelling one wakes every thread blocked in
/// [`CancellationToken::wait_timeout`] on any clone.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    /// Create a new cancellation token (not cancelled).
    pub fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    fn flag(&self) -> MutexGuard<'_, bool> {
        // A bool cannot be left half-written, so a poisoned lock is still usable
        self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Cancel this token. All clones will observe the cancellation.
    pub fn cancel(&self) {
        *self.flag() = true;
        self.inner.1.notify_all();
    }

    /// Check if this token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.flag()
    }

    /// Cancel this token when the process receives Ctrl+C, SIGTERM or SIGHUP.
    ///
    /// Only one handler can be installed per process.
    pub fn cancel_on_ctrlc(&self) -> Result<()> {
        let token = self.clone();
        ctrlc::set_handler(move || {
            info!("Interrupt received, shutting down");
            token.cancel();
        })?;
        Ok(())
    }

    /// Block for up to `timeout`, returning early once cancelled.
    ///
    /// Returns `true` if the token is cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut cancelled = self.flag();
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            cancelled = match self.inner.1.wait_timeout(cancelled, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
        true
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
