//! Cancellable one-shot timers

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// A callback scheduled to run once after a delay
///
/// Dropping the task cancels it. The callback never runs after `cancel`.
#[derive(Debug)]
pub struct ScheduledTask {
    cancel: CancellationToken,
}

impl ScheduledTask {
    /// Run `fire` after `delay` on the tokio runtime
    pub fn after<F>(delay: Duration, fire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => fire(),
            }
        });

        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
