use log::warn;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// A single cancellable delayed callback.
///
/// Arming always aborts the previous task first, so at most one callback is pending.
/// Each arm bumps `generation`; the callback receives the generation it was armed
/// with and its owner checks [`Alarm::is_current`] before acting, which keeps an
/// alarm that was superseded while already firing from doing anything.
#[derive(Debug, Default)]
pub(crate) struct Alarm {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl Alarm {
    /// Schedules `on_fire` after `after`, replacing any pending callback.
    /// Returns `false` when called outside a tokio runtime, in which case nothing is
    /// scheduled.
    pub fn arm<F>(&mut self, after: Duration, on_fire: F) -> bool
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Cannot arm alarm without a runtime: {}", e);
                return false;
            }
        };

        self.generation += 1;
        let generation = self.generation;
        let deadline = Instant::now() + after;
        self.pending = Some(handle.spawn(async move {
            time::sleep_until(deadline).await;
            on_fire(generation);
        }));
        true
    }

    /// Aborts the pending callback. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets the pending callback without aborting it; used by the callback itself.
    pub fn expire(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.pending.is_some() && self.generation == generation
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.cancel();
    }
}
