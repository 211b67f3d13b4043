//! Blocking `ureq` agent driven from async code.
//!
//! Every request runs on tokio's blocking pool so a slow backend never stalls
//! the task that owns a poller.

use std::io::Read;
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::HttpConfig;
use crate::http::errors::HttpError;
use crate::http::multipart::MultipartForm;

/// Longest slice of a non-JSON error body kept in an error message.
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// JSON-over-HTTP client shared by every backend client.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
    max_response_bytes: usize,
}

struct PreparedRequest {
    method: &'static str,
    url: Url,
    body: Option<RequestBody>,
}

struct RequestBody {
    content_type: String,
    bytes: Vec<u8>,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(config.connect_timeout())
            .timeout_read(config.read_timeout())
            .timeout_write(config.read_timeout())
            .build();

        Self {
            agent,
            max_response_bytes: config.max_response_bytes(),
        }
    }

    /// `GET url` and decode the JSON body.
    pub async fn get_json<T>(&self, url: Url) -> Result<T, HttpError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.execute(PreparedRequest {
            method: "GET",
            url,
            body: None,
        })
        .await
    }

    /// `POST url` with a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, url: Url, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send + 'static,
    {
        let bytes = serde_json::to_vec(body).map_err(|e| HttpError::Encode {
            url: url.to_string(),
            source: e,
        })?;

        self.execute(PreparedRequest {
            method: "POST",
            url,
            body: Some(RequestBody {
                content_type: "application/json".to_string(),
                bytes,
            }),
        })
        .await
    }

    /// `POST url` with a `multipart/form-data` body and decode the JSON response.
    pub async fn post_multipart<T>(&self, url: Url, form: MultipartForm) -> Result<T, HttpError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let (content_type, bytes) = form.finish();

        self.execute(PreparedRequest {
            method: "POST",
            url,
            body: Some(RequestBody {
                content_type,
                bytes,
            }),
        })
        .await
    }

    /// `POST url` without a body and decode the JSON response.
    pub async fn post_empty<T>(&self, url: Url) -> Result<T, HttpError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.execute(PreparedRequest {
            method: "POST",
            url,
            body: None,
        })
        .await
    }

    async fn execute<T>(&self, request: PreparedRequest) -> Result<T, HttpError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let agent = self.agent.clone();
        let max_bytes = self.max_response_bytes;

        tokio::task::spawn_blocking(move || send_blocking(&agent, request, max_bytes))
            .await
            .map_err(|e| HttpError::TaskFailed {
                message: e.to_string(),
            })?
    }
}

fn send_blocking<T: DeserializeOwned>(
    agent: &ureq::Agent,
    request: PreparedRequest,
    max_bytes: usize,
) -> Result<T, HttpError> {
    let url = request.url.to_string();
    let started = Instant::now();

    let builder = agent.request(request.method, &url);
    let result = match request.body {
        Some(body) => builder
            .set("Content-Type", &body.content_type)
            .send_bytes(&body.bytes),
        None => builder.call(),
    };

    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = read_body(response, max_bytes, &url).unwrap_or_default();
            return Err(HttpError::Status {
                url,
                code,
                message: error_message_from_body(&String::from_utf8_lossy(&body)),
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(HttpError::Transport {
                url,
                message: transport.to_string(),
            });
        }
    };

    let body = read_body(response, max_bytes, &url)?;

    debug!(
        event = "core.http.request_completed",
        method = request.method,
        url = %url,
        bytes = body.len(),
        elapsed_ms = elapsed_ms(started.elapsed())
    );

    decode_json(url, &body)
}

/// Decode a success body. Invalid UTF-8 is a decode error, not a lossy string.
fn decode_json<T: DeserializeOwned>(url: String, body: &[u8]) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|e| HttpError::Decode { url, source: e })
}

/// Read a response body into memory, enforcing a maximum byte size.
fn read_body(response: ureq::Response, max_bytes: usize, url: &str) -> Result<Vec<u8>, HttpError> {
    let mut limited = response.into_reader().take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited
        .read_to_end(&mut bytes)
        .map_err(|e| HttpError::Io {
            url: url.to_string(),
            source: e,
        })?;

    if bytes.len() > max_bytes {
        return Err(HttpError::ResponseTooLarge {
            url: url.to_string(),
            limit: max_bytes,
        });
    }

    Ok(bytes)
}

/// Pull a human-readable message out of an error body.
///
/// The backends answer errors with either `{"detail": ...}` or `{"message": ...}`.
pub fn error_message_from_body(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(ERROR_BODY_PREVIEW_CHARS).collect()
}

/// Join an endpoint path onto a base URL, keeping any path prefix of the base.
pub fn endpoint(base: &Url, path: &str) -> Result<Url, HttpError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|e| HttpError::InvalidUrl {
            message: format!("cannot join '{}' onto '{}': {}", path, base, e),
        })
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
