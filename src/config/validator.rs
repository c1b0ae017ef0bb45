//! Configuration validation.
//!
//! Collects every problem in one pass: errors stop the tool, warnings are
//! reported and ignored.

use crate::error::{ConfigError, Result};
use reqwest::Url;
use tracing::debug;

use super::types::{ApiConfig, OpsConfig, PollingSettings, TargetConfig};

/// Validator for `cf-ops` configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator {
    /// Treat a missing target space as an error.
    require_space: bool,
}

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
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            require_space: false,
        }
    }

    /// Makes a missing target space an error rather than a warning.
    #[must_use]
    pub const fn require_space(mut self, require: bool) -> Self {
        self.require_space = require;
        self
    }

    /// Validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first error if validation fails.
    pub fn validate(&self, config: &OpsConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_api(&config.api, &mut result);
        self.validate_target(&config.target, &mut result);
        Self::validate_polling(&config.polling, &mut result);

        if result.errors.is_empty() {
            debug!("Configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(ConfigError::ValidationError {
                message: first_error.message.clone(),
                field: Some(first_error.field.clone()),
            }
            .into())
        }
    }

    fn validate_api(api: &ApiConfig, result: &mut ValidationResult) {
        if api.url.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("api.url"),
                message: String::from("API URL cannot be empty"),
            });
        } else {
            check_url("api.url", &api.url, result);
        }

        if let Some(url) = &api.uaa_url {
            check_url("api.uaa_url", url, result);
        }
        if let Some(url) = &api.log_cache_url {
            check_url("api.log_cache_url", url, result);
        }

        if api.timeout_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("api.timeout_secs"),
                message: String::from("Request timeout must be greater than zero"),
            });
        }

        if api.skip_ssl_validation {
            result
                .warnings
                .push(String::from("TLS certificate validation is disabled"));
        }
    }

    fn validate_target(&self, target: &TargetConfig, result: &mut ValidationResult) {
        if target.space_id.as_deref().is_some_and(|id| !id.is_empty()) {
            return;
        }

        let message = String::from("No target space; space operations will fail");
        if self.require_space {
            result.errors.push(ValidationError {
                field: String::from("target.space_id"),
                message,
            });
        } else {
            result.warnings.push(message);
        }
    }

    fn validate_polling(polling: &PollingSettings, result: &mut ValidationResult) {
        if polling.timeout_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("polling.timeout_secs"),
                message: String::from("Job timeout must be greater than zero"),
            });
        } else if polling.interval_ms >= polling.timeout_secs.saturating_mul(1000) {
            result.warnings.push(format!(
                "Polling interval ({} ms) is not shorter than the job timeout ({} s)",
                polling.interval_ms, polling.timeout_secs
            ));
        }
    }
}

fn check_url(field: &str, url: &str, result: &mut ValidationResult) {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
            if parsed.scheme() == "http" {
                result
                    .warnings
                    .push(format!("{field} uses plain HTTP: {url}"));
            }
        }
        Ok(parsed) => result.errors.push(ValidationError {
            field: field.to_string(),
            message: format!("Unsupported URL scheme '{}' in {url}", parsed.scheme()),
        }),
        Err(e) => result.errors.push(ValidationError {
            field: field.to_string(),
            message: format!("Invalid URL '{url}': {e}"),
        }),
    }
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
