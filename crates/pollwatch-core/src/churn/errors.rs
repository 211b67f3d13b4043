use std::path::PathBuf;

use crate::errors::PollwatchError;
use crate::http::HttpError;

#[derive(Debug, thiserror::Error)]
pub enum ChurnError {
    #[error("Failed to read customer profile '{path}': {source}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Customer profile '{path}' is malformed: {message}")]
    ProfileParse { path: PathBuf, message: String },

    #[error("Invalid customer profile: {message}")]
    InvalidProfile { message: String },

    #[error("Churn prediction failed: {source}")]
    Http {
        #[from]
        source: HttpError,
    },
}

impl PollwatchError for ChurnError {
    fn error_code(&self) -> &'static str {
        match self {
            ChurnError::ProfileRead { .. } => "CHURN_PROFILE_READ_FAILED",
            ChurnError::ProfileParse { .. } => "CHURN_PROFILE_PARSE_FAILED",
            ChurnError::InvalidProfile { .. } => "CHURN_INVALID_PROFILE",
            ChurnError::Http { .. } => "CHURN_HTTP_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, ChurnError::Http { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_are_user_errors() {
        let error = ChurnError::InvalidProfile {
            message: "SeniorCitizen must be 0 or 1 (got 2)".to_string(),
        };
        assert!(error.is_user_error());
        assert_eq!(error.error_code(), "CHURN_INVALID_PROFILE");
    }

    #[test]
    fn test_server_error_keeps_detail() {
        let error = ChurnError::from(HttpError::Status {
            url: "http://127.0.0.1:8000/predict".to_string(),
            code: 500,
            message: "could not convert string to float: 'abc'".to_string(),
        });
        assert!(!error.is_user_error());
        assert!(error.to_string().contains("could not convert string to float"));
    }
}
