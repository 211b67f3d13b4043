use crate::errors::PollwatchError;
use crate::http::HttpError;
use crate::sentiment::MAX_TWEET_LENGTH;

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("Please enter some text to analyze.")]
    EmptyInput,

    #[error(
        "Tweet exceeds maximum length of {max} characters ({length} given).",
        max = MAX_TWEET_LENGTH
    )]
    InputTooLong { length: usize },

    #[error("Prediction request failed: {source}")]
    Http {
        #[from]
        source: HttpError,
    },
}

impl PollwatchError for PredictError {
    fn error_code(&self) -> &'static str {
        match self {
            PredictError::EmptyInput => "PREDICT_EMPTY_INPUT",
            PredictError::InputTooLong { .. } => "PREDICT_INPUT_TOO_LONG",
            PredictError::Http { .. } => "PREDICT_HTTP_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            PredictError::EmptyInput | PredictError::InputTooLong { .. }
        )
    }
}
