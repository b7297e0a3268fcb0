//! Configuration for the box office.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "box_office=info,cinema_tickets_core=info";

/// Errors from loading configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag was set to something other than a boolean
    #[error("{key} must be `true` or `false`, got `{value}`")]
    InvalidFlag {
        /// Environment variable name
        key: &'static str,
        /// Value found
        value: String,
    },
}

/// Box office configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tracing filter directive, used when `RUST_LOG` is unset
    pub log_level: String,
    /// Install a Prometheus recorder for purchase metrics
    pub metrics_enabled: bool,
    /// Write the rendered metrics to stderr before exiting
    pub print_metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            metrics_enabled: false,
            print_metrics: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a flag variable holds something other than a boolean.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns error if a flag variable holds something other than a boolean.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let print_metrics = flag(&lookup, "BOX_OFFICE_PRINT_METRICS", defaults.print_metrics)?;

        Ok(Self {
            log_level: lookup("BOX_OFFICE_LOG").unwrap_or(defaults.log_level),
            // Printing needs a recorder to print from.
            metrics_enabled: flag(&lookup, "BOX_OFFICE_METRICS", defaults.metrics_enabled)?
                || print_metrics,
            print_metrics,
        })
    }
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidFlag { key, value })
    })
}
