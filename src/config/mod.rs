//! Configuration module for the Stratovia client.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `stratovia.yaml`
//! - Environment variable overrides and `.env` loading
//! - Validation of configuration values

mod settings;
mod parser;
mod validator;

pub use settings::{
    ApiConfig, AuthConfig, ClientConfig, DefaultsConfig, WaitConfig, ENV_PASSWORD, ENV_USERNAME,
};
pub use parser::{ConfigParser, find_config_file, DEFAULT_CONFIG_FILES};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
