//! Job monitor: polls `GET /train/status` until the job completes or fails.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::PollwatchError;
use crate::poller::{self, FirstTick, PollHandle, PollTick, TickFlow};
use crate::training::client::{StatusSource, TrainingClient};
use crate::training::errors::TrainingError;
use crate::training::state::{PollState, Transition};
use crate::training::types::JobOutcome;

/// Period between two status polls.
pub const JOB_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// Poll-and-update cycle for one training job.
///
/// `on_update` runs after every successful poll; `on_terminal` runs once, when
/// the job completes or fails. Failed polls are logged and skipped.
pub struct TrainingPoller<S, U, T> {
    source: S,
    state: PollState,
    on_update: U,
    on_terminal: Option<T>,
}

impl<S, U, T> TrainingPoller<S, U, T>
where
    S: StatusSource,
    U: FnMut(&PollState) + Send + 'static,
    T: FnOnce(JobOutcome) + Send + 'static,
{
    pub fn new(source: S, on_update: U, on_terminal: T) -> Self {
        Self {
            source,
            state: PollState::new(),
            on_update,
            on_terminal: Some(on_terminal),
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }
}

impl<S, U, T> PollTick for TrainingPoller<S, U, T>
where
    S: StatusSource,
    U: FnMut(&PollState) + Send + 'static,
    T: FnOnce(JobOutcome) + Send + 'static,
{
    async fn tick(&mut self, liveness: &CancellationToken) -> TickFlow {
        let report = match self.source.fetch_status().await {
            Ok(report) => report,
            Err(e) => {
                warn!(
                    event = "core.training.poll_failed",
                    error = %e,
                    error_code = e.error_code(),
                    progress = self.state.progress()
                );
                return TickFlow::Continue;
            }
        };

        if liveness.is_cancelled() {
            debug!(
                event = "core.training.stale_report_discarded",
                status = %report.status
            );
            return TickFlow::Finished;
        }

        let remote = report.status.to_string();
        let transition = self.state.apply(report);
        debug!(
            event = "core.training.poll_completed",
            remote_status = %remote,
            status = %self.state.status(),
            progress = self.state.progress()
        );

        (self.on_update)(&self.state);

        if transition != Transition::Terminal {
            return TickFlow::Continue;
        }

        liveness.cancel();
        info!(
            event = "core.training.job_finished",
            status = %self.state.status()
        );

        if let (Some(on_terminal), Some(outcome)) =
            (self.on_terminal.take(), self.state.take_outcome())
        {
            on_terminal(outcome);
        }

        TickFlow::Finished
    }
}

/// Start polling `source` every `interval`.
///
/// The first poll fires one interval after the call. Must be called from
/// within a tokio runtime.
pub fn start<S, U, T>(source: S, interval: Duration, on_update: U, on_terminal: T) -> PollHandle
where
    S: StatusSource,
    U: FnMut(&PollState) + Send + 'static,
    T: FnOnce(JobOutcome) + Send + 'static,
{
    poller::spawn(
        "training",
        interval,
        FirstTick::AfterInterval,
        TrainingPoller::new(source, on_update, on_terminal),
    )
}

/// Trigger a training run with `POST /train`, then monitor it.
///
/// Polling starts only once the trigger request has been answered.
pub async fn start_training<U, T>(
    client: TrainingClient,
    on_update: U,
    on_terminal: T,
) -> Result<(String, PollHandle), TrainingError>
where
    U: FnMut(&PollState) + Send + 'static,
    T: FnOnce(JobOutcome) + Send + 'static,
{
    let response = client.trigger().await?;
    let handle = start(client, JOB_POLL_INTERVAL, on_update, on_terminal);
    Ok((response.message, handle))
}
