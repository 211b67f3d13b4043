//! pollwatch-core: Polling monitors for ML inference backends
//!
//! This library drives the periodic network polls behind the `pollwatch` CLI:
//! a job monitor that follows a training run until it completes or fails, and
//! a dashboard refresher that keeps sentiment statistics current. It also
//! carries the single-shot clients for the other inference backends.
//!
//! # Main Entry Points
//!
//! - [`training`] - Trigger a training run and monitor its status
//! - [`dashboard`] - Refresh `/stats` and `/recent` into a [`DashboardView`]
//! - [`sentiment`] - One-shot tweet sentiment prediction
//! - [`churn`] - Customer churn scoring from a profile file
//! - [`traffic_sign`] - Traffic sign recognition from an uploaded image
//! - [`poller`] - Fixed-interval polling engine with cancellable handles
//! - [`config`] - Configuration management

pub mod churn;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod events;
pub mod http;
pub mod logging;
pub mod poller;
pub mod sentiment;
pub mod traffic_sign;
pub mod training;

// Re-export commonly used types at crate root for convenience
pub use churn::{ChurnClient, ChurnError, ChurnPrediction, CustomerProfile};
pub use config::PollwatchConfig;
pub use dashboard::{DashboardClient, DashboardView, RecentTable, Sentiment};
pub use errors::{ConfigError, PollwatchError, PollwatchResult};
pub use http::{HttpClient, HttpError};
pub use poller::{PollHandle, PollTick, TickFlow};
pub use sentiment::{PredictError, Prediction, SentimentClient};
pub use traffic_sign::{SignError, SignPrediction, TrafficSignClient};
pub use training::{
    EpochMetrics, JobOutcome, JobStatus, PollState, StatusReport, TrainingClient, TrainingError,
};

// Re-export logging initialization
pub use logging::init_logging;
