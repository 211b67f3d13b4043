use std::fmt;

use serde::{Deserialize, Serialize};

/// Status string reported by `GET /train/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemoteStatus {
    /// No job has been started on the backend yet.
    Idle,
    Pending,
    Training,
    Running,
    Completed,
    Failed,
    /// Anything else; kept verbatim for logging.
    Unrecognized(String),
}

impl From<String> for RemoteStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "idle" => RemoteStatus::Idle,
            "pending" => RemoteStatus::Pending,
            "training" => RemoteStatus::Training,
            "running" => RemoteStatus::Running,
            "completed" => RemoteStatus::Completed,
            "failed" => RemoteStatus::Failed,
            _ => RemoteStatus::Unrecognized(raw),
        }
    }
}

impl From<RemoteStatus> for String {
    fn from(status: RemoteStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteStatus::Idle => write!(f, "idle"),
            RemoteStatus::Pending => write!(f, "pending"),
            RemoteStatus::Training => write!(f, "training"),
            RemoteStatus::Running => write!(f, "running"),
            RemoteStatus::Completed => write!(f, "completed"),
            RemoteStatus::Failed => write!(f, "failed"),
            RemoteStatus::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// Body of `GET /train/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: RemoteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<TrainingHistory>,
}

impl StatusReport {
    pub fn new(status: RemoteStatus) -> Self {
        Self {
            status,
            error: None,
            history: None,
        }
    }
}

/// Keras-style accuracy history, one entry per epoch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrainingHistory {
    #[serde(default)]
    pub accuracy: Vec<f64>,
    #[serde(default)]
    pub val_accuracy: Vec<f64>,
}

impl TrainingHistory {
    /// Pair the two series per epoch (1-based). The shorter series wins.
    pub fn epochs(&self) -> Vec<EpochMetrics> {
        self.accuracy
            .iter()
            .zip(&self.val_accuracy)
            .zip(1u32..)
            .map(|((&train, &validation), epoch)| EpochMetrics {
                epoch,
                train_accuracy: train,
                validation_accuracy: validation,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    pub epoch: u32,
    pub train_accuracy: f64,
    pub validation_accuracy: f64,
}

/// Body of `POST /train`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainResponse {
    pub message: String,
}

/// Locally tracked job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "Pending"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Handed to the terminal callback, once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    Completed { history: Option<Vec<EpochMetrics>> },
    Failed { message: String },
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobOutcome::Completed { .. } => write!(f, "Training finished successfully!"),
            JobOutcome::Failed { message } => write!(f, "Training failed: {}", message),
        }
    }
}
