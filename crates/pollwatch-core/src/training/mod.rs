pub mod client;
pub mod errors;
pub mod monitor;
pub mod state;
pub mod types;

pub use client::{StatusSource, TrainingClient};
pub use errors::TrainingError;
pub use monitor::{JOB_POLL_INTERVAL, TrainingPoller, start, start_training};
pub use state::{PROGRESS_CEILING, PROGRESS_COMPLETE, PollState, Transition};
pub use types::{
    EpochMetrics, JobOutcome, JobStatus, RemoteStatus, StatusReport, TrainResponse,
    TrainingHistory,
};
