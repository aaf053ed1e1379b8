//! Configuration validation for client settings.
//!
//! This module provides validation of client configurations, ensuring all
//! values are valid and consistent before any API call is made.

use crate::error::{ConfigError, Result, StratoviaError};
use std::collections::HashSet;
use tracing::debug;

use super::settings::{ApiConfig, AuthConfig, ClientConfig, DefaultsConfig, WaitConfig};

/// Validator for client configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Known valid locations.
    known_locations: HashSet<String>,
}

/// Locations with a known Stratovia presence.
const KNOWN_LOCATIONS: &[&str] = &[
    "us/las",
    "us/ewr",
    "de/fra",
    "de/fkb",
    "de/txl",
    "gb/lhr",
    "es/vit",
    "fr/par",
];

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator with the default known locations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            known_locations: KNOWN_LOCATIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Adds a custom location to the known list.
    pub fn add_location(&mut self, location: impl Into<String>) {
        self.known_locations.insert(location.into());
    }

    /// Validates a client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first validation failure.
    pub fn validate(&self, config: &ClientConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_api(&config.api, &mut result);
        Self::validate_auth(&config.auth, &mut result);
        self.validate_defaults(&config.defaults, &mut result);
        Self::validate_wait(&config.wait, &mut result);

        if result.errors.is_empty() {
            debug!("Configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(StratoviaError::Config(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }))
        }
    }

    /// Validates the API section.
    fn validate_api(api: &ApiConfig, result: &mut ValidationResult) {
        if api.endpoint.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("api.endpoint"),
                message: String::from("API endpoint cannot be empty"),
            });
        } else if !api.endpoint.starts_with("https://") && !api.endpoint.starts_with("http://") {
            result.errors.push(ValidationError {
                field: String::from("api.endpoint"),
                message: format!(
                    "API endpoint '{}' is invalid. Must start with http:// or https://",
                    api.endpoint
                ),
            });
        }

        if api.depth > 10 {
            result.errors.push(ValidationError {
                field: String::from("api.depth"),
                message: String::from("Depth must be between 0 and 10"),
            });
        } else if api.depth > 5 {
            result.warnings.push(format!(
                "api.depth: Depth {} returns deeply nested entities and slows responses",
                api.depth
            ));
        }

        if api.timeout_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("api.timeout_secs"),
                message: String::from("HTTP timeout must be at least 1 second"),
            });
        }
    }

    /// Validates the auth section.
    fn validate_auth(auth: &AuthConfig, result: &mut ValidationResult) {
        if auth.username.as_ref().is_some_and(String::is_empty) {
            result.errors.push(ValidationError {
                field: String::from("auth.username"),
                message: String::from("Username cannot be empty when set"),
            });
        }

        if auth.password.is_some() && auth.username.is_none() {
            result.warnings.push(String::from(
                "auth.password: Password is set but username is not",
            ));
        }

        if auth.username.is_none() && auth.password.is_none() {
            result.warnings.push(String::from(
                "auth: No credentials in configuration; they will be resolved from the environment",
            ));
        }
    }

    /// Validates the defaults section.
    fn validate_defaults(&self, defaults: &DefaultsConfig, result: &mut ValidationResult) {
        if defaults.location.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("defaults.location"),
                message: String::from("Default location cannot be empty"),
            });
        } else if !is_valid_location(&defaults.location) {
            result.errors.push(ValidationError {
                field: String::from("defaults.location"),
                message: format!(
                    "Location '{}' is invalid. Expected format: region/site (e.g. us/las)",
                    defaults.location
                ),
            });
        } else if !self.known_locations.contains(&defaults.location) {
            result.warnings.push(format!(
                "defaults.location: Unknown location '{}'. This may fail if not available.",
                defaults.location
            ));
        }
    }

    /// Validates the wait section.
    fn validate_wait(wait: &WaitConfig, result: &mut ValidationResult) {
        if wait.timeout_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("wait.timeout_secs"),
                message: String::from("Wait timeout must be at least 1 second"),
            });
        }

        if wait.poll_interval_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("wait.poll_interval_secs"),
                message: String::from("Poll interval must be at least 1 second"),
            });
        }

        if wait.max_poll_interval_secs < wait.poll_interval_secs {
            result.warnings.push(format!(
                "wait.max_poll_interval_secs: Cap {} is below the initial interval {}; the interval will never grow",
                wait.max_poll_interval_secs, wait.poll_interval_secs
            ));
        }

        if wait.timeout_secs < wait.poll_interval_secs {
            result.warnings.push(format!(
                "wait.timeout_secs: Budget {} is shorter than a single poll interval",
                wait.timeout_secs
            ));
        }
    }
}

/// Validates that a location follows the `region/site` convention:
/// a two-letter region code and a site code of at least three letters.
fn is_valid_location(name: &str) -> bool {
    let Some((region, site)) = name.split_once('/') else {
        return false;
    };

    region.len() == 2
        && region.chars().all(|c| c.is_ascii_lowercase())
        && site.len() >= 3
        && site.chars().all(|c| c.is_ascii_lowercase())
}

impl ValidationResult {
    /// Returns true if validation passed (no errors).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub const fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Returns the number of warnings.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
