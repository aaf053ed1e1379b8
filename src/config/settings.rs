//! Configuration types for the CloudAPI client.
//!
//! This module defines the structs that map to the `stratovia.yaml` file.
//! Every section and field has a sensible default, so an empty file (or no
//! file at all) yields a working configuration once credentials are
//! supplied.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::cloudapi::{WaitOptions, DEFAULT_API_URL};
use crate::error::{ConfigError, Result, StratoviaError};

/// Environment variable holding the API username.
pub const ENV_USERNAME: &str = "STRATOVIA_USERNAME";

/// Environment variable holding the API password.
pub const ENV_PASSWORD: &str = "STRATOVIA_PASSWORD";

/// The root configuration structure for the Stratovia client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ClientConfig {
    /// API endpoint configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Credential configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Defaults applied to newly created resources.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Completion polling configuration.
    #[serde(default)]
    pub wait: WaitConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the CloudAPI.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Entity nesting depth requested on GET calls (0-10).
    #[serde(default = "default_depth")]
    pub depth: u8,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Credential configuration.
///
/// Credentials given here take precedence over the environment. Leaving
/// them out of the file and using `STRATOVIA_USERNAME` / `STRATOVIA_PASSWORD`
/// is the recommended setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AuthConfig {
    /// API username.
    #[serde(default)]
    pub username: Option<String>,
    /// API password.
    #[serde(default)]
    pub password: Option<String>,
}

/// Defaults applied to newly created resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultsConfig {
    /// Location used when creating a datacenter without one.
    #[serde(default = "default_location")]
    pub location: String,
}

/// Completion polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaitConfig {
    /// Overall wait budget in seconds.
    #[serde(default = "default_wait_timeout_secs")]
    pub timeout_secs: u64,
    /// Initial delay between status checks in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Upper bound for the growing delay between checks in seconds.
    #[serde(default = "default_max_poll_interval_secs")]
    pub max_poll_interval_secs: u64,
}

// Default value functions

fn default_endpoint() -> String {
    String::from(DEFAULT_API_URL)
}

const fn default_depth() -> u8 {
    1
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_location() -> String {
    String::from("us/las")
}

const fn default_wait_timeout_secs() -> u64 {
    300
}

const fn default_poll_interval_secs() -> u64 {
    5
}

const fn default_max_poll_interval_secs() -> u64 {
    60
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            depth: default_depth(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_wait_timeout_secs(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_interval_secs: default_max_poll_interval_secs(),
        }
    }
}

impl ClientConfig {
    /// Resolves credentials from the configuration, falling back to the
    /// `STRATOVIA_USERNAME` and `STRATOVIA_PASSWORD` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first credential
    /// that could not be resolved.
    pub fn credentials(&self) -> Result<(String, String)> {
        let username = Self::resolve(self.auth.username.as_deref(), ENV_USERNAME)?;
        let password = Self::resolve(self.auth.password.as_deref(), ENV_PASSWORD)?;

        Ok((username, password))
    }

    /// Resolves a single credential from the config or the environment.
    fn resolve(configured: Option<&str>, env_var: &str) -> Result<String> {
        if let Some(value) = configured {
            return Ok(value.to_string());
        }

        std::env::var(env_var).map_err(|_| {
            StratoviaError::Config(ConfigError::MissingEnvVar {
                name: env_var.to_string(),
            })
        })
    }
}

impl WaitConfig {
    /// Converts the configured durations into poller options.
    #[must_use]
    pub const fn to_wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            max_poll_interval: Duration::from_secs(self.max_poll_interval_secs),
        }
    }
}
