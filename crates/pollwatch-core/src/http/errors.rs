use crate::errors::PollwatchError;

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Invalid endpoint URL: {message}")]
    InvalidUrl { message: String },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {code}: {message}")]
    Status {
        url: String,
        code: u16,
        message: String,
    },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Response from {url} exceeded {limit} bytes")]
    ResponseTooLarge { url: String, limit: usize },

    #[error("Failed to read response from {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP worker task failed: {message}")]
    TaskFailed { message: String },
}

impl HttpError {
    /// HTTP status code, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the backend could not be reached (as opposed to answering badly).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, HttpError::Transport { .. })
    }
}

impl PollwatchError for HttpError {
    fn error_code(&self) -> &'static str {
        match self {
            HttpError::InvalidUrl { .. } => "HTTP_INVALID_URL",
            HttpError::Transport { .. } => "HTTP_TRANSPORT",
            HttpError::Status { .. } => "HTTP_STATUS",
            HttpError::Decode { .. } => "HTTP_MALFORMED_RESPONSE",
            HttpError::Encode { .. } => "HTTP_ENCODE",
            HttpError::ResponseTooLarge { .. } => "HTTP_RESPONSE_TOO_LARGE",
            HttpError::Io { .. } => "HTTP_IO",
            HttpError::TaskFailed { .. } => "HTTP_TASK_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, HttpError::InvalidUrl { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let error = HttpError::Status {
            url: "http://127.0.0.1:8000/recent".to_string(),
            code: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "http://127.0.0.1:8000/recent returned HTTP 404: Not Found"
        );
        assert_eq!(error.status_code(), Some(404));
        assert!(!error.is_unreachable());
        assert_eq!(error.error_code(), "HTTP_STATUS");
    }

    #[test]
    fn test_transport_error_is_unreachable() {
        let error = HttpError::Transport {
            url: "http://127.0.0.1:8000/stats".to_string(),
            message: "Connection refused".to_string(),
        };
        assert!(error.is_unreachable());
        assert_eq!(error.status_code(), None);
        assert!(!error.is_user_error());
    }
}
