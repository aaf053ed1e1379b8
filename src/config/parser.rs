//! Configuration parser for loading and merging configuration files.
//!
//! This module handles loading configuration from YAML files and environment
//! variables, with proper precedence and error handling.

use crate::error::{ConfigError, Result, StratoviaError};
use std::path::Path;
use tracing::{debug, info};

use super::settings::{ClientConfig, ENV_PASSWORD, ENV_USERNAME};

/// Configuration parser for loading client configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<std::path::PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path for resolving relative paths.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ClientConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(StratoviaError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            StratoviaError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ClientConfig> {
        debug!("Parsing YAML configuration");

        let config: ClientConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            StratoviaError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!("Successfully parsed configuration for endpoint: {}", config.api.endpoint);
        Ok(config)
    }

    /// Loads configuration with environment variable overrides.
    ///
    /// Environment variables are checked in the format:
    /// `STRATOVIA_<SECTION>_<KEY>` (e.g., `STRATOVIA_API_ENDPOINT`)
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_with_env(&self, path: impl AsRef<Path>) -> Result<ClientConfig> {
        let mut config = self.load_file(path)?;

        // Apply environment overrides
        Self::apply_env_overrides(&mut config);

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Credentials are not overridden here; they have their own resolution
    /// order in [`ClientConfig::credentials`].
    pub fn apply_env_overrides(config: &mut ClientConfig) {
        // API overrides
        if let Ok(endpoint) = std::env::var("STRATOVIA_API_ENDPOINT") {
            debug!("Overriding api.endpoint from environment");
            config.api.endpoint = endpoint;
        }

        if let Some(depth) = std::env::var("STRATOVIA_API_DEPTH")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            debug!("Overriding api.depth from environment");
            config.api.depth = depth;
        }

        // Defaults overrides
        if let Ok(location) = std::env::var("STRATOVIA_DEFAULT_LOCATION") {
            debug!("Overriding defaults.location from environment");
            config.defaults.location = location;
        }

        // Wait overrides
        if let Some(timeout) = std::env::var("STRATOVIA_WAIT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            debug!("Overriding wait.timeout_secs from environment");
            config.wait.timeout_secs = timeout;
        }
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| std::path::PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                StratoviaError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }

    /// Validates that required environment variables are set.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing variable.
    pub fn validate_required_env(&self) -> Result<()> {
        const REQUIRED_VARS: &[&str] = &[ENV_USERNAME, ENV_PASSWORD];

        for var in REQUIRED_VARS {
            if std::env::var(var).is_err() {
                return Err(StratoviaError::Config(ConfigError::MissingEnvVar {
                    name: (*var).to_string(),
                }));
            }
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "stratovia.yaml",
    "stratovia.yml",
    ".stratovia.yaml",
    ".stratovia.yml",
];

/// Finds the configuration file in the current directory, parent
/// directories, or the user-level config directory.
///
/// # Errors
///
/// Returns an error if no configuration file is found.
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Result<std::path::PathBuf> {
    let start = start_dir.as_ref();
    let mut current = start.to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Ok(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join("stratovia").join(DEFAULT_CONFIG_FILES[0]);
        if user_path.exists() {
            info!("Found configuration file: {}", user_path.display());
            return Ok(user_path);
        }
    }

    Err(StratoviaError::Config(ConfigError::FileNotFound {
        path: start.join(DEFAULT_CONFIG_FILES[0]),
    }))
}
