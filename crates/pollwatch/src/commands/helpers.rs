use clap::ArgMatches;
use tracing::{error, warn};

use pollwatch_core::config::{EndpointConfig, parse_base_url};
use pollwatch_core::{ConfigError, PollwatchConfig};
use url::Url;

/// Load the config hierarchy, falling back to defaults with a visible warning.
pub(crate) fn load_config_with_warning() -> PollwatchConfig {
    match PollwatchConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.pollwatch/config.toml and ./.pollwatch/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            PollwatchConfig::default()
        }
    }
}

/// Base URL for one backend: `--url` if given, otherwise the config value.
pub(crate) fn resolve_base_url(
    matches: &ArgMatches,
    section: &str,
    endpoint: &EndpointConfig,
) -> Result<Url, ConfigError> {
    let raw = matches
        .get_one::<String>("url")
        .map(String::as_str)
        .unwrap_or_else(|| endpoint.base_url());

    parse_base_url(section, raw).inspect_err(|e| {
        eprintln!("❌ {}", e);
        error!(event = "cli.base_url_invalid", section = section, error = %e);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_cli;

    #[test]
    fn test_url_flag_overrides_config() {
        let matches = build_cli()
            .try_get_matches_from(vec!["pollwatch", "status", "--url", "http://10.1.1.1:9000/"])
            .unwrap();
        let status = matches.subcommand_matches("status").unwrap();
        let endpoint = EndpointConfig {
            base_url: Some("http://127.0.0.1:8000".to_string()),
        };

        let url = resolve_base_url(status, "training", &endpoint).unwrap();
        assert_eq!(url.as_str(), "http://10.1.1.1:9000/");
    }

    #[test]
    fn test_config_used_without_flag() {
        let matches = build_cli()
            .try_get_matches_from(vec!["pollwatch", "status"])
            .unwrap();
        let status = matches.subcommand_matches("status").unwrap();

        let url = resolve_base_url(status, "training", &EndpointConfig::default()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_invalid_url_flag_rejected() {
        let matches = build_cli()
            .try_get_matches_from(vec!["pollwatch", "status", "--url", "ftp://example.com"])
            .unwrap();
        let status = matches.subcommand_matches("status").unwrap();

        assert!(resolve_base_url(status, "training", &EndpointConfig::default()).is_err());
    }
}
