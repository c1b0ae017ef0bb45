//! Background job requests and resources.

use serde::{Deserialize, Serialize};

use crate::client::resource::Resource;
use crate::client::validation::non_empty;
use crate::error::{CloudFoundryError, RequestError};

/// Status of a background job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted but not started.
    Queued,
    /// In progress.
    #[default]
    Running,
    /// Completed successfully.
    Finished,
    /// Completed with an error.
    Failed,
}

impl JobStatus {
    /// Returns true once the job can no longer change state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Finished => "finished",
            Self::Failed => "failed",
        };
        write!(f, "{status}")
    }
}

/// Error payload of a failed job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Numeric platform error code.
    #[serde(default)]
    pub code: u32,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Symbolic error code.
    #[serde(default)]
    pub error_code: String,
}

impl From<ErrorDetails> for CloudFoundryError {
    fn from(details: ErrorDetails) -> Self {
        Self {
            code: details.code,
            error_code: details.error_code,
            description: details.description,
        }
    }
}

/// A job entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobEntity {
    /// Job identifier, repeated in the entity.
    #[serde(default, rename = "guid")]
    pub id: Option<String>,
    /// Current status.
    #[serde(default)]
    pub status: JobStatus,
    /// Short error message of a failed job.
    #[serde(default)]
    pub error: Option<String>,
    /// Detailed error of a failed job.
    #[serde(default)]
    pub error_details: Option<ErrorDetails>,
}

impl JobEntity {
    /// Builds the platform error describing why this job failed.
    #[must_use]
    pub fn failure(&self) -> CloudFoundryError {
        self.error_details.clone().map_or_else(
            || CloudFoundryError {
                code: 0,
                error_code: String::from("UnknownError"),
                description: self
                    .error
                    .clone()
                    .unwrap_or_else(|| String::from("job failed without error details")),
            },
            CloudFoundryError::from,
        )
    }
}

/// A job resource.
pub type JobResource = Resource<JobEntity>;

/// Request to fetch a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetJobRequest {
    job_id: String,
}

impl GetJobRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the job id is empty.
    pub fn new(job_id: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self {
            job_id: non_empty(job_id, "job id")?,
        })
    }

    /// The job identifier.
    #[must_use]
    pub fn job_id(&self) -> &str {
        &self.job_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_failed_job() {
        let json = r#"{
            "metadata": { "guid": "test-job-id", "url": "/v2/jobs/test-job-id" },
            "entity": {
                "guid": "test-job-id",
                "status": "failed",
                "error": "Use of entity>error is deprecated in favor of entity>error_details.",
                "error_details": {
                    "code": 10001,
                    "description": "Bind failed",
                    "error_code": "CF-ServiceBrokerBadResponse"
                }
            }
        }"#;
        let job: JobResource = serde_json::from_str(json).expect("should parse");
        assert_eq!(job.entity.status, JobStatus::Failed);
        assert_eq!(
            job.entity.failure().to_string(),
            "CF-ServiceBrokerBadResponse(10001): Bind failed"
        );
    }

    #[test]
    fn test_failure_without_details() {
        let entity = JobEntity {
            status: JobStatus::Failed,
            error: Some(String::from("boom")),
            ..JobEntity::default()
        };
        assert_eq!(entity.failure().description, "boom");
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Finished.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_get_job_requires_id() {
        assert_eq!(
            GetJobRequest::new(""),
            Err(RequestError::MissingField { field: "job id" })
        );
    }
}
