//! Application operations.

use tracing::info;

use crate::client::v3::{CancelTaskRequest, ListApplicationTasksRequest};
use crate::client::validation::{require, require_text};
use crate::client::CloudFoundryClient;
use crate::error::{RequestError, ResolutionError, Result};
use crate::operations::{lookup, Context};

/// Request to cancel a running task of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminateApplicationTaskRequest {
    application_name: String,
    sequence_id: u32,
}

impl TerminateApplicationTaskRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> TerminateApplicationTaskRequestBuilder {
        TerminateApplicationTaskRequestBuilder::default()
    }

    /// The application name.
    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// The task's sequence id within the application.
    #[must_use]
    pub const fn sequence_id(&self) -> u32 {
        self.sequence_id
    }
}

/// Builder for [`TerminateApplicationTaskRequest`].
#[derive(Debug, Clone, Default)]
pub struct TerminateApplicationTaskRequestBuilder {
    application_name: Option<String>,
    sequence_id: Option<u32>,
}

impl TerminateApplicationTaskRequestBuilder {
    /// Sets the application name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Sets the task's sequence id.
    #[must_use]
    pub const fn sequence_id(mut self, sequence_id: u32) -> Self {
        self.sequence_id = Some(sequence_id);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the application name or sequence id is missing.
    pub fn build(self) -> std::result::Result<TerminateApplicationTaskRequest, RequestError> {
        Ok(TerminateApplicationTaskRequest {
            application_name: require_text(self.application_name, "application name")?,
            sequence_id: require(self.sequence_id, "sequence id")?,
        })
    }
}

/// Application operations in the targeted space.
#[derive(Debug)]
pub struct Applications<C: ?Sized> {
    context: Context<C>,
}

impl<C: CloudFoundryClient + ?Sized> Applications<C> {
    pub(crate) const fn new(context: Context<C>) -> Self {
        Self { context }
    }

    /// Cancels the task with the given sequence id.
    ///
    /// # Errors
    ///
    /// Returns an error if no space is targeted, the application or task
    /// does not exist, or the cancellation is rejected.
    pub async fn terminate_task(&self, request: &TerminateApplicationTaskRequest) -> Result<()> {
        let space_id = self.context.space_id()?;
        let client = self.context.client.as_ref();

        let application_id =
            lookup::application_id(client, space_id, request.application_name()).await?;

        let list = ListApplicationTasksRequest::builder()
            .application_id(application_id)
            .sequence_id(request.sequence_id())
            .page(1)
            .build()?;
        let task_id = client
            .list_application_tasks(&list)
            .await?
            .resources
            .into_iter()
            .next()
            .map(|task| task.id)
            .ok_or_else(|| ResolutionError::not_found("Task", request.sequence_id().to_string()))?;

        let task = client.cancel_task(&CancelTaskRequest::new(task_id)?).await?;
        info!(
            "Cancelled task {} ({}) of application {}",
            request.sequence_id(),
            task.name,
            request.application_name()
        );
        Ok(())
    }
}
