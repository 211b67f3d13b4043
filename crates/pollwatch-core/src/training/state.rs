//! Job progress state machine.
//!
//! Pure: no I/O, no timers. The monitor feeds it one [`StatusReport`] per
//! successful poll.

use serde::Serialize;
use tracing::warn;

use crate::training::types::{EpochMetrics, JobOutcome, JobStatus, RemoteStatus, StatusReport};

/// Simulated progress never passes this while the job is still running.
pub const PROGRESS_CEILING: u8 = 95;

/// Progress shown once the job completed.
pub const PROGRESS_COMPLETE: u8 = 100;

/// Message used when the backend reports `failed` without an error.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Effect of one status report on [`PollState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed (unrecognized status, or a report after a terminal state).
    Unchanged,
    /// Status or progress moved.
    Updated,
    /// The job just completed or failed.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollState {
    status: JobStatus,
    progress: u8,
    #[serde(skip)]
    error: Option<String>,
    #[serde(skip)]
    history: Option<Vec<EpochMetrics>>,
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}

impl PollState {
    pub fn new() -> Self {
        Self {
            status: JobStatus::Pending,
            progress: 0,
            error: None,
            history: None,
        }
    }

    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Completion percentage, 0-100.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Apply one report from the backend.
    pub fn apply(&mut self, report: StatusReport) -> Transition {
        if self.is_terminal() {
            return Transition::Unchanged;
        }

        match report.status {
            RemoteStatus::Training | RemoteStatus::Running => {
                self.status = JobStatus::Running;
                if self.progress < PROGRESS_CEILING {
                    self.progress += 1;
                }
                Transition::Updated
            }
            RemoteStatus::Pending | RemoteStatus::Idle => {
                if self.status == JobStatus::Pending {
                    Transition::Unchanged
                } else {
                    self.status = JobStatus::Pending;
                    Transition::Updated
                }
            }
            RemoteStatus::Completed => {
                self.status = JobStatus::Completed;
                self.progress = PROGRESS_COMPLETE;
                self.history = report.history.map(|h| h.epochs());
                Transition::Terminal
            }
            RemoteStatus::Failed => {
                self.status = JobStatus::Failed;
                self.error = Some(
                    report
                        .error
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
                );
                Transition::Terminal
            }
            RemoteStatus::Unrecognized(raw) => {
                warn!(
                    event = "core.training.status_unrecognized",
                    status = %raw
                );
                Transition::Unchanged
            }
        }
    }

    /// Move the terminal outcome out of the state.
    ///
    /// The history is handed over at most once: later calls return a
    /// `Completed` outcome without history. `None` while the job is not terminal.
    pub fn take_outcome(&mut self) -> Option<JobOutcome> {
        match self.status {
            JobStatus::Completed => Some(JobOutcome::Completed {
                history: self.history.take(),
            }),
            JobStatus::Failed => Some(JobOutcome::Failed {
                message: self
                    .error
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            }),
            JobStatus::Pending | JobStatus::Running => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::types::TrainingHistory;

    fn report(status: RemoteStatus) -> StatusReport {
        StatusReport::new(status)
    }

    #[test]
    fn test_new_state_is_pending_at_zero() {
        let state = PollState::new();
        assert_eq!(state.status(), JobStatus::Pending);
        assert_eq!(state.progress(), 0);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_training_increments_progress_up_to_ceiling() {
        let mut state = PollState::new();
        let mut last = state.progress();

        for _ in 0..200 {
            assert_eq!(state.apply(report(RemoteStatus::Training)), Transition::Updated);
            assert!(state.progress() >= last, "progress must not decrease");
            assert!(state.progress() <= PROGRESS_CEILING);
            last = state.progress();
        }

        assert_eq!(state.status(), JobStatus::Running);
        assert_eq!(state.progress(), PROGRESS_CEILING);
    }

    #[test]
    fn test_running_treated_like_training() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Running));
        assert_eq!(state.status(), JobStatus::Running);
        assert_eq!(state.progress(), 1);
    }

    #[test]
    fn test_pending_and_idle_leave_progress_alone() {
        let mut state = PollState::new();
        assert_eq!(state.apply(report(RemoteStatus::Idle)), Transition::Unchanged);
        state.apply(report(RemoteStatus::Training));
        state.apply(report(RemoteStatus::Training));

        assert_eq!(state.apply(report(RemoteStatus::Pending)), Transition::Updated);
        assert_eq!(state.status(), JobStatus::Pending);
        assert_eq!(state.progress(), 2);
    }

    #[test]
    fn test_completed_forces_full_progress_and_keeps_history_once() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Training));

        let completed = StatusReport {
            status: RemoteStatus::Completed,
            error: None,
            history: Some(TrainingHistory {
                accuracy: vec![0.5, 0.6],
                val_accuracy: vec![0.4, 0.5],
            }),
        };
        assert_eq!(state.apply(completed), Transition::Terminal);
        assert_eq!(state.progress(), PROGRESS_COMPLETE);
        assert!(state.is_terminal());

        match state.take_outcome() {
            Some(JobOutcome::Completed { history: Some(epochs) }) => assert_eq!(epochs.len(), 2),
            other => panic!("expected completed outcome with history, got {:?}", other),
        }
        assert_eq!(
            state.take_outcome(),
            Some(JobOutcome::Completed { history: None }),
            "history is handed over only once"
        );
    }

    #[test]
    fn test_failed_keeps_error_message() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Training));

        let failed = StatusReport {
            status: RemoteStatus::Failed,
            error: Some("OOM".to_string()),
            history: None,
        };
        assert_eq!(state.apply(failed), Transition::Terminal);
        assert_eq!(state.status(), JobStatus::Failed);
        assert_eq!(state.progress(), 1, "failure does not move progress");
        assert_eq!(
            state.take_outcome(),
            Some(JobOutcome::Failed {
                message: "OOM".to_string()
            })
        );
    }

    #[test]
    fn test_failed_without_error_uses_placeholder() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Failed));
        assert_eq!(
            state.take_outcome(),
            Some(JobOutcome::Failed {
                message: UNKNOWN_ERROR.to_string()
            })
        );
    }

    #[test]
    fn test_unrecognized_status_changes_nothing() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Training));
        let before = state.clone();

        let transition = state.apply(report(RemoteStatus::Unrecognized("paused".to_string())));
        assert_eq!(transition, Transition::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn test_reports_after_terminal_are_ignored() {
        let mut state = PollState::new();
        state.apply(report(RemoteStatus::Completed));
        let before = state.clone();

        assert_eq!(state.apply(report(RemoteStatus::Training)), Transition::Unchanged);
        assert_eq!(state.apply(report(RemoteStatus::Failed)), Transition::Unchanged);
        assert_eq!(state, before);
    }

    #[test]
    fn test_take_outcome_none_while_running() {
        let mut state = PollState::new();
        assert!(state.take_outcome().is_none());
        state.apply(report(RemoteStatus::Training));
        assert!(state.take_outcome().is_none());
    }
}
