use crate::errors::PollwatchError;
use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("Could not start training: {source}")]
    TriggerFailed {
        #[source]
        source: HttpError,
    },

    #[error("Could not read training status: {source}")]
    StatusFailed {
        #[source]
        source: HttpError,
    },

    #[error("Invalid training endpoint: {source}")]
    InvalidEndpoint {
        #[from]
        source: HttpError,
    },
}

impl PollwatchError for TrainingError {
    fn error_code(&self) -> &'static str {
        match self {
            TrainingError::TriggerFailed { .. } => "TRAINING_TRIGGER_FAILED",
            TrainingError::StatusFailed { .. } => "TRAINING_STATUS_FAILED",
            TrainingError::InvalidEndpoint { .. } => "TRAINING_INVALID_ENDPOINT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, TrainingError::InvalidEndpoint { .. })
    }
}
