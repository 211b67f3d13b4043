use std::path::PathBuf;

use crate::errors::PollwatchError;
use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("Failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image '{path}' is empty")]
    EmptyImage { path: PathBuf },

    #[error("Sign recognition failed: {source}")]
    Http {
        #[from]
        source: HttpError,
    },
}

impl SignError {
    /// The backend answers 400 until a model has been trained.
    pub fn is_model_missing(&self) -> bool {
        matches!(
            self,
            SignError::Http {
                source: HttpError::Status { code: 400, .. }
            }
        )
    }
}

impl PollwatchError for SignError {
    fn error_code(&self) -> &'static str {
        match self {
            SignError::ImageRead { .. } => "SIGN_IMAGE_READ_FAILED",
            SignError::EmptyImage { .. } => "SIGN_EMPTY_IMAGE",
            SignError::Http { .. } => "SIGN_HTTP_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SignError::ImageRead { .. } | SignError::EmptyImage { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untrained_model_detected() {
        let error = SignError::from(HttpError::Status {
            url: "http://127.0.0.1:8000/predict".to_string(),
            code: 400,
            message: "Model not loaded. Please train first.".to_string(),
        });
        assert!(error.is_model_missing());
        assert!(!error.is_user_error());
        assert_eq!(
            error.to_string(),
            "Sign recognition failed: http://127.0.0.1:8000/predict returned HTTP 400: Model not loaded. Please train first."
        );
    }

    #[test]
    fn test_server_failure_is_not_model_missing() {
        let error = SignError::from(HttpError::Status {
            url: "http://127.0.0.1:8000/predict".to_string(),
            code: 500,
            message: "cannot identify image file".to_string(),
        });
        assert!(!error.is_model_missing());
        assert_eq!(error.error_code(), "SIGN_HTTP_FAILED");
    }

    #[test]
    fn test_empty_image_is_user_error() {
        let error = SignError::EmptyImage {
            path: PathBuf::from("blank.png"),
        };
        assert!(error.is_user_error());
        assert_eq!(error.to_string(), "Image 'blank.png' is empty");
    }
}
