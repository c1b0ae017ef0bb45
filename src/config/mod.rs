//! Configuration module for the `cf-ops` tool.
//!
//! This module handles all configuration-related functionality:
//! - Parsing `cf-ops.yaml` and `.env` files
//! - Environment variable overrides
//! - Validation of configuration values

mod parser;
mod types;
mod validator;

pub use parser::{
    apply_env_overrides, find_config_file, user_config_file, ConfigParser, DEFAULT_CONFIG_FILES,
    ENV_ACCESS_TOKEN, ENV_API_URL, ENV_LOG_CACHE_URL, ENV_SPACE_ID, ENV_UAA_URL,
};
pub use types::{ApiConfig, OpsConfig, PollingSettings, TargetConfig};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
