//! Error types for the Cloud Foundry operations SDK.
//!
//! Errors fall into distinguishable kinds: local request validation,
//! platform errors reported by the remote API, name resolution failures,
//! transport failures, and operation-level failures such as a missing
//! target or a job that never terminates.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the SDK.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A request failed local validation.
    #[error("Request is invalid: {0}")]
    Request(#[from] RequestError),

    /// The platform reported an error.
    #[error("{0}")]
    CloudFoundry(#[from] CloudFoundryError),

    /// The UAA reported an error.
    #[error("{0}")]
    Uaa(#[from] UaaError),

    /// A name lookup returned no match.
    #[error("{0}")]
    Resolution(#[from] ResolutionError),

    /// Transport-level errors.
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Operation-level errors.
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },
}

/// Local validation errors raised when a request value is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A required field was not supplied.
    #[error("{field} must be specified")]
    MissingField {
        /// Human readable field name.
        field: &'static str,
    },

    /// Fields that cannot be combined were supplied together.
    #[error("{message}")]
    Conflict {
        /// The conflicting fields.
        fields: Vec<&'static str>,
        /// Description of the conflict.
        message: String,
    },

    /// A field value has an invalid format.
    #[error("{field} '{value}' is invalid: {reason}")]
    InvalidFormat {
        /// Human readable field name.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// An error reported by the cloud controller, either directly in a
/// response body or through a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error_code}({code}): {description}")]
pub struct CloudFoundryError {
    /// Numeric platform error code.
    pub code: u32,
    /// Symbolic error code (e.g. `CF-ServiceBindingNotFound`).
    pub error_code: String,
    /// Human readable description.
    pub description: String,
}

/// An error reported by the UAA.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}: {description}")]
pub struct UaaError {
    /// OAuth error identifier (e.g. `invalid_grant`).
    pub error: String,
    /// Human readable description.
    pub description: String,
}

/// Raised locally when a name-based lookup matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No resource of the given kind has the given name.
    #[error("{entity} {name} does not exist")]
    NotFound {
        /// Kind of resource (e.g. `Application`).
        entity: &'static str,
        /// The name that could not be resolved.
        name: String,
    },

    /// The service instance exists but is not bound to the application.
    #[error("Service instance {service_instance} is not bound to application {application}")]
    NotBound {
        /// Service instance name.
        service_instance: String,
        /// Application name.
        application: String,
    },
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Authentication failed.
    #[error("authentication failed: {message}")]
    AuthenticationFailed {
        /// Description of the auth failure.
        message: String,
    },

    /// The API answered with an unexpected status and no platform error body.
    #[error("request failed: {status} - {message}")]
    ApiRequestFailed {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Rate limited.
    #[error("rate limited, retry after {retry_after_secs} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Network error.
    #[error("network error: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from API.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },

    /// An endpoint required by the call was not configured.
    #[error("no {endpoint} endpoint configured")]
    MissingEndpoint {
        /// The endpoint kind (e.g. `uaa`).
        endpoint: &'static str,
    },
}

/// Operation-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The operation needs a target that is not configured.
    #[error("no {target} targeted")]
    NoTarget {
        /// The missing target kind (e.g. `space`).
        target: &'static str,
    },

    /// A job did not reach a terminal state in time.
    #[error("timeout waiting for job {job_id} after {waited_ms} ms")]
    JobTimeout {
        /// The job identifier.
        job_id: String,
        /// How long the poller waited, in milliseconds.
        waited_ms: u64,
    },
}

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, CfError>;

impl CfError {
    /// Returns true if this error is retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Client(ClientError::RateLimited { .. } | ClientError::NetworkError { .. })
        )
    }

    /// Returns the suggested retry delay in seconds, if applicable.
    #[must_use]
    pub const fn retry_delay_secs(&self) -> Option<u64> {
        match self {
            Self::Client(ClientError::RateLimited { retry_after_secs }) => Some(*retry_after_secs),
            Self::Client(ClientError::NetworkError { .. }) => Some(1),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

impl RequestError {
    /// Creates a missing-field error.
    #[must_use]
    pub const fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Creates a conflict error between the given fields.
    #[must_use]
    pub fn conflict(fields: &[&'static str], message: impl Into<String>) -> Self {
        Self::Conflict {
            fields: fields.to_vec(),
            message: message.into(),
        }
    }
}

impl ResolutionError {
    /// Creates a not-found error for the given entity kind and name.
    #[must_use]
    pub fn not_found(entity: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }
}

impl ClientError {
    /// Creates an API request error.
    #[must_use]
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiRequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid-response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
