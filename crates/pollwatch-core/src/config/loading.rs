//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.pollwatch/config.toml`
//! 3. **Project config** - `./.pollwatch/config.toml`
//! 4. **CLI arguments** - `--url` flags (highest priority, applied by the CLI)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{EndpointConfig, HttpConfig, PollwatchConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".pollwatch";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or if
/// the merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<PollwatchConfig, ConfigError> {
    let mut config = PollwatchConfig::default();

    if let Some(path) = user_config_path()
        && let Some(user_config) = load_optional(&path)?
    {
        config = merge_configs(config, user_config);
    }

    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    if let Some(project_config) = load_optional(&project_path)? {
        config = merge_configs(config, project_config);
    }

    validate_config(&config)?;

    Ok(config)
}

/// `~/.pollwatch/config.toml`, or `None` when no home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load a config file, treating a missing file as `None`.
fn load_optional(path: &Path) -> Result<Option<PollwatchConfig>, ConfigError> {
    match load_config_file(path) {
        Ok(config) => Ok(Some(config)),
        Err(ConfigError::IoError { source }) if source.kind() == std::io::ErrorKind::NotFound => {
            debug!(
                event = "core.config.file_missing",
                path = %path.display()
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<PollwatchConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("'{}': {}", path.display(), e),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Every field is optional, so an override only wins where it was actually set.
pub fn merge_configs(base: PollwatchConfig, override_config: PollwatchConfig) -> PollwatchConfig {
    PollwatchConfig {
        training: merge_endpoint(base.training, override_config.training),
        dashboard: merge_endpoint(base.dashboard, override_config.dashboard),
        sentiment: merge_endpoint(base.sentiment, override_config.sentiment),
        churn: merge_endpoint(base.churn, override_config.churn),
        traffic_sign: merge_endpoint(base.traffic_sign, override_config.traffic_sign),
        http: HttpConfig {
            connect_timeout_secs: override_config
                .http
                .connect_timeout_secs
                .or(base.http.connect_timeout_secs),
            read_timeout_secs: override_config
                .http
                .read_timeout_secs
                .or(base.http.read_timeout_secs),
            max_response_bytes: override_config
                .http
                .max_response_bytes
                .or(base.http.max_response_bytes),
        },
    }
}

fn merge_endpoint(base: EndpointConfig, override_config: EndpointConfig) -> EndpointConfig {
    EndpointConfig {
        base_url: override_config.base_url.or(base.base_url),
    }
}
