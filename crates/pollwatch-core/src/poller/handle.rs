use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use uuid::Uuid;

/// Owned handle to a running poller.
///
/// Exactly one handle exists per poller. Stopping is idempotent, and dropping
/// the handle stops the poller as well.
pub struct PollHandle {
    id: Uuid,
    name: &'static str,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub(crate) fn new(
        id: Uuid,
        name: &'static str,
        cancel: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            id,
            name,
            cancel,
            task: Some(task),
        }
    }

    /// Identifier carried by every log event of this poller.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the poller is still scheduled to tick.
    ///
    /// Turns false on `stop()`, when a tick reached a terminal condition, and
    /// when the task exited for any other reason (a panicking tick included).
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the poller.
    ///
    /// A tick still in flight is dropped at its next await point, so its
    /// response is never applied. Returns `true` if this call did the cancelling and `false` if
    /// the poller had already stopped, in which case nothing happens.
    pub fn stop(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }

        self.cancel.cancel();
        info!(
            event = "core.poller.stop_requested",
            poller = self.name,
            poller_id = %self.id
        );
        true
    }

    /// Wait until the polling task has exited.
    ///
    /// Returns immediately if it already has. Cancel-safe: dropping this future
    /// leaves the handle usable.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                error!(
                    event = "core.poller.task_failed",
                    poller = self.name,
                    poller_id = %self.id,
                    error = %e
                );
            }
            self.task = None;
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for PollHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_handle() -> PollHandle {
        let cancel = CancellationToken::new();
        let liveness = cancel.clone();
        let task = tokio::spawn(async move { liveness.cancelled().await });
        PollHandle::new(Uuid::new_v4(), "idle", cancel, task)
    }

    #[tokio::test]
    async fn test_stop_twice_is_noop() {
        let mut handle = idle_handle();
        assert!(handle.is_active());

        assert!(handle.stop(), "first stop cancels");
        assert!(!handle.stop(), "second stop does nothing");
        assert!(!handle.is_active());

        handle.finished().await;
        handle.finished().await;
    }

    #[tokio::test]
    async fn test_drop_cancels_task() {
        let handle = idle_handle();
        let token = handle.cancel.clone();
        drop(handle);
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn test_panicked_task_is_inactive() {
        let task = tokio::spawn(async { panic!("tick blew up") });
        let mut handle =
            PollHandle::new(Uuid::new_v4(), "panicky", CancellationToken::new(), task);

        handle.finished().await;
        assert!(!handle.is_active());
        assert!(handle.stop(), "token was never cancelled by the task");
    }

    #[tokio::test]
    async fn test_exited_task_is_inactive_before_finished() {
        let task = tokio::spawn(async {});
        let handle = PollHandle::new(Uuid::new_v4(), "short", CancellationToken::new(), task);

        while handle.task.as_ref().is_some_and(|t| !t.is_finished()) {
            tokio::task::yield_now().await;
        }
        assert!(!handle.is_active());
    }
}
