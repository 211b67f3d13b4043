//! Configuration validation.

use url::Url;

use crate::config::types::PollwatchConfig;
use crate::errors::ConfigError;

/// Parse a backend base URL, accepting only http and https.
pub fn parse_base_url(section: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidConfiguration {
        message: format!("{}.base_url '{}' is not a valid URL: {}", section, raw, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidConfiguration {
            message: format!(
                "{}.base_url '{}' uses unsupported scheme '{}' (expected http or https)",
                section, raw, other
            ),
        }),
    }
}

/// Validate the merged configuration.
pub fn validate_config(config: &PollwatchConfig) -> Result<(), ConfigError> {
    parse_base_url("training", config.training.base_url())?;
    parse_base_url("dashboard", config.dashboard.base_url())?;
    parse_base_url("sentiment", config.sentiment.base_url())?;
    parse_base_url("churn", config.churn.base_url())?;
    parse_base_url("traffic_sign", config.traffic_sign.base_url())?;

    if config.http.connect_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "http.connect_timeout_secs must be greater than 0".to_string(),
        });
    }
    if config.http.read_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "http.read_timeout_secs must be greater than 0".to_string(),
        });
    }
    if config.http.max_response_bytes == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "http.max_response_bytes must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&PollwatchConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        let err = parse_base_url("training", "not a url").unwrap_err();
        assert!(err.to_string().contains("training.base_url"));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        let err = parse_base_url("dashboard", "ftp://example.com").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_parse_base_url_trims_whitespace() {
        let url = parse_base_url("sentiment", "  http://localhost:9000 ").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PollwatchConfig::default();
        config.http.read_timeout_secs = Some(0);
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: http.read_timeout_secs must be greater than 0"
        );
    }

    #[test]
    fn test_invalid_section_url_rejected() {
        let mut config = PollwatchConfig::default();
        config.dashboard.base_url = Some("127.0.0.1:8000".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_traffic_sign_url_is_validated() {
        let mut config = PollwatchConfig::default();
        config.traffic_sign.base_url = Some("file:///tmp/model".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("traffic_sign.base_url"));
    }
}
