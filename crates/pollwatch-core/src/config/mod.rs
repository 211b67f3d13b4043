//! # Configuration System
//!
//! Hierarchical TOML configuration for pollwatch.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - every backend at `http://127.0.0.1:8000`
//! 2. **User config** - `~/.pollwatch/config.toml`
//! 3. **Project config** - `./.pollwatch/config.toml`
//! 4. **CLI arguments** - `--url` (highest priority)
//!
//! Polling intervals are fixed constants ([`crate::training::JOB_POLL_INTERVAL`],
//! [`crate::dashboard::DASHBOARD_REFRESH_INTERVAL`]) and are not part of the
//! configuration.
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use pollwatch_core::config::PollwatchConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PollwatchConfig::load_hierarchy()?;
//!     let training_url = config.training.base_url();
//!     println!("{training_url}");
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{EndpointConfig, HttpConfig, PollwatchConfig};
pub use validation::{parse_base_url, validate_config};

impl PollwatchConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
