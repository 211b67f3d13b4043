//! Dashboard refresher: re-reads `/stats` and `/recent` on a fixed period
//! until stopped.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::dashboard::client::DashboardSource;
use crate::dashboard::view::DashboardView;
use crate::errors::PollwatchError;
use crate::poller::{self, FirstTick, PollHandle, PollTick, TickFlow};

pub const DASHBOARD_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Keeps a [`DashboardView`] in sync with the backend.
///
/// Both endpoints are fetched on every tick and applied independently.
/// `on_update` runs after every tick that was not cancelled, failed or not.
pub struct DashboardRefresher<S, U> {
    source: S,
    view: DashboardView,
    on_update: U,
}

impl<S, U> DashboardRefresher<S, U>
where
    S: DashboardSource,
    U: FnMut(&DashboardView) + Send + 'static,
{
    pub fn new(source: S, on_update: U) -> Self {
        Self {
            source,
            view: DashboardView::new(),
            on_update,
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }
}

impl<S, U> PollTick for DashboardRefresher<S, U>
where
    S: DashboardSource,
    U: FnMut(&DashboardView) + Send + 'static,
{
    async fn tick(&mut self, liveness: &CancellationToken) -> TickFlow {
        let (stats, recent) = tokio::join!(self.source.fetch_stats(), self.source.fetch_recent());

        if liveness.is_cancelled() {
            debug!(event = "core.dashboard.stale_refresh_discarded");
            return TickFlow::Finished;
        }

        match stats {
            Ok(buckets) => {
                debug!(
                    event = "core.dashboard.stats_refreshed",
                    buckets = buckets.len()
                );
                self.view.apply_stats(&buckets);
            }
            Err(e) => {
                warn!(
                    event = "core.dashboard.stats_failed",
                    error = %e,
                    error_code = e.error_code()
                );
                if self.view.stats_failed() {
                    debug!(event = "core.dashboard.banner_shown");
                }
            }
        }

        match recent {
            Ok(predictions) => {
                debug!(
                    event = "core.dashboard.recent_refreshed",
                    predictions = predictions.len()
                );
                self.view.apply_recent(&predictions);
            }
            Err(e) => {
                warn!(
                    event = "core.dashboard.recent_failed",
                    error = %e,
                    error_code = e.error_code()
                );
                self.view.recent_failed(&e);
            }
        }

        (self.on_update)(&self.view);
        TickFlow::Continue
    }
}

/// Start refreshing from `source`.
///
/// The first refresh runs immediately, then every
/// [`DASHBOARD_REFRESH_INTERVAL`]. There is no terminal condition: the
/// refresher runs until the handle is stopped or dropped.
pub fn start<S, U>(source: S, on_update: U) -> PollHandle
where
    S: DashboardSource,
    U: FnMut(&DashboardView) + Send + 'static,
{
    start_with_interval(source, DASHBOARD_REFRESH_INTERVAL, on_update)
}

pub fn start_with_interval<S, U>(source: S, interval: Duration, on_update: U) -> PollHandle
where
    S: DashboardSource,
    U: FnMut(&DashboardView) + Send + 'static,
{
    poller::spawn(
        "dashboard",
        interval,
        FirstTick::Immediate,
        DashboardRefresher::new(source, on_update),
    )
}
