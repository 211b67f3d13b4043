//! Fixed-interval polling engine shared by the training monitor and the
//! dashboard refresher.
//!
//! Each poller is one tokio task that owns its state and callbacks. The task
//! waits on a timer, runs one [`PollTick::tick`], and repeats until the tick
//! reports [`TickFlow::Finished`] or the [`PollHandle`] is stopped.
//!
//! Ticks never overlap: the loop awaits a tick before it waits on the timer
//! again, and timer fires missed while a slow tick was running are skipped
//! rather than replayed. Stopping the handle drops a tick that is still in
//! flight, so the task exits without waiting for a slow backend.

pub mod handle;

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

pub use handle::PollHandle;

/// What the loop does after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    /// Wait for the next timer fire.
    Continue,
    /// Terminal condition reached; the poller stops and releases its handle.
    Finished,
}

/// When the first tick fires relative to [`spawn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    /// Poll right away, then every period.
    Immediate,
    /// Wait one full period before the first poll.
    AfterInterval,
}

/// One poll-and-update cycle.
pub trait PollTick: Send + 'static {
    /// Run a single cycle.
    ///
    /// `liveness` is cancelled as soon as the owning handle is stopped. A tick
    /// must check it after every await and before touching shared state, so a
    /// response that arrives after `stop()` is dropped instead of applied.
    fn tick(&mut self, liveness: &CancellationToken) -> impl Future<Output = TickFlow> + Send;
}

/// Start polling on a fixed period.
///
/// Must be called from within a tokio runtime. The returned handle is the only
/// way to cancel the poller; dropping it cancels too.
pub fn spawn<T: PollTick>(
    name: &'static str,
    period: Duration,
    first_tick: FirstTick,
    mut poller: T,
) -> PollHandle {
    let cancel = CancellationToken::new();
    let liveness = cancel.clone();
    let id = Uuid::new_v4();

    let task = tokio::spawn(async move {
        let start = match first_tick {
            FirstTick::Immediate => Instant::now(),
            FirstTick::AfterInterval => Instant::now() + period,
        };
        let mut timer = tokio::time::interval_at(start, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(
            event = "core.poller.started",
            poller = name,
            poller_id = %id,
            interval_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
        );

        let mut ticks: u64 = 0;
        let reason = loop {
            tokio::select! {
                biased;
                _ = liveness.cancelled() => break "stopped",
                _ = timer.tick() => {}
            }

            ticks += 1;
            debug!(
                event = "core.poller.tick_started",
                poller = name,
                poller_id = %id,
                tick = ticks
            );

            let flow = tokio::select! {
                biased;
                _ = liveness.cancelled() => break "stopped",
                flow = poller.tick(&liveness) => flow,
            };
            if flow == TickFlow::Finished {
                liveness.cancel();
                break "finished";
            }
        };

        info!(
            event = "core.poller.stopped",
            poller = name,
            poller_id = %id,
            ticks = ticks,
            reason = reason
        );
    });

    PollHandle::new(id, name, cancel, task)
}
