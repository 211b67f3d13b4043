//! Configuration type definitions for pollwatch.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [training]
//! base_url = "http://127.0.0.1:8000"
//!
//! [dashboard]
//! base_url = "http://127.0.0.1:8001"
//!
//! [churn]
//! base_url = "http://127.0.0.1:8002"
//!
//! [http]
//! connect_timeout_secs = 5
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.pollwatch/config.toml`
/// 2. Project config: `./.pollwatch/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PollwatchConfig {
    /// Backend serving `POST /train` and `GET /train/status`
    #[serde(default)]
    pub training: EndpointConfig,

    /// Backend serving `GET /stats` and `GET /recent`
    #[serde(default)]
    pub dashboard: EndpointConfig,

    /// Backend serving `POST /predict` for tweets
    #[serde(default)]
    pub sentiment: EndpointConfig,

    /// Backend serving `POST /predict` for customer churn
    #[serde(default)]
    pub churn: EndpointConfig,

    /// Backend serving the multipart `POST /predict` for sign images
    #[serde(default)]
    pub traffic_sign: EndpointConfig,

    /// HTTP client tuning
    #[serde(default)]
    pub http: HttpConfig,
}

/// Location of one inference backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EndpointConfig {
    /// Base URL the endpoint paths are joined onto.
    /// Default: `http://127.0.0.1:8000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// HTTP client settings shared by every backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpConfig {
    /// Default: 10 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,

    /// Default: 30 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_timeout_secs: Option<u64>,

    /// Upper bound on a response body before it is rejected.
    /// Default: 1 MiB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_bytes: Option<usize>,
}
