//! Task requests and resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::resource::{push_page, Query};
use crate::client::validation::{non_empty, require_text};
use crate::error::RequestError;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    /// Waiting to run.
    Pending,
    /// Running.
    Running,
    /// Cancellation requested.
    Canceling,
    /// Completed successfully.
    Succeeded,
    /// Completed with a failure.
    Failed,
}

/// A task resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResource {
    /// Task identifier.
    #[serde(rename = "guid")]
    pub id: String,
    /// Task name.
    pub name: String,
    /// Per-application sequence number.
    pub sequence_id: u32,
    /// Current state.
    pub state: TaskState,
    /// Command, only visible to privileged users.
    #[serde(default)]
    pub command: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to list the tasks of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListApplicationTasksRequest {
    application_id: String,
    sequence_ids: Vec<u32>,
    page: Option<u32>,
}

impl ListApplicationTasksRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> ListApplicationTasksRequestBuilder {
        ListApplicationTasksRequestBuilder::default()
    }

    /// The application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Sequence id filter.
    #[must_use]
    pub fn sequence_ids(&self) -> &[u32] {
        &self.sequence_ids
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        if !self.sequence_ids.is_empty() {
            let ids = self
                .sequence_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            query.push(("sequence_ids", ids));
        }
        push_page(&mut query, self.page);
        query
    }
}

/// Builder for [`ListApplicationTasksRequest`].
#[derive(Debug, Clone, Default)]
pub struct ListApplicationTasksRequestBuilder {
    application_id: Option<String>,
    sequence_ids: Vec<u32>,
    page: Option<u32>,
}

impl ListApplicationTasksRequestBuilder {
    /// Sets the application identifier.
    #[must_use]
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Adds a sequence id to the filter.
    #[must_use]
    pub fn sequence_id(mut self, sequence_id: u32) -> Self {
        self.sequence_ids.push(sequence_id);
        self
    }

    /// Sets the page to fetch.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the application id is missing.
    pub fn build(self) -> Result<ListApplicationTasksRequest, RequestError> {
        Ok(ListApplicationTasksRequest {
            application_id: require_text(self.application_id, "application id")?,
            sequence_ids: self.sequence_ids,
            page: self.page,
        })
    }
}

/// Request to cancel a running task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTaskRequest {
    task_id: String,
}

impl CancelTaskRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the task id is empty.
    pub fn new(task_id: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self {
            task_id: non_empty(task_id, "task id")?,
        })
    }

    /// The task identifier.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}
