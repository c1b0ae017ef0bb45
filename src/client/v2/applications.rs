//! Application requests and resources.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::resource::{push_filter, push_page, Query, Resource};
use crate::client::validation::{non_empty, require, require_text};
use crate::error::RequestError;

/// An application entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationEntity {
    /// Application name.
    pub name: String,
    /// Owning space.
    #[serde(default, rename = "space_guid")]
    pub space_id: Option<String>,
    /// Desired state (`STARTED` or `STOPPED`).
    #[serde(default)]
    pub state: Option<String>,
    /// Number of instances.
    #[serde(default)]
    pub instances: Option<u32>,
    /// Memory per instance in MB.
    #[serde(default)]
    pub memory: Option<u32>,
    /// Disk quota per instance in MB.
    #[serde(default)]
    pub disk_quota: Option<u32>,
    /// Whether the application runs on Diego.
    #[serde(default)]
    pub diego: Option<bool>,
    /// Stack identifier.
    #[serde(default, rename = "stack_guid")]
    pub stack_id: Option<String>,
}

/// An application resource.
pub type ApplicationResource = Resource<ApplicationEntity>;

/// Request to fetch a single application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetApplicationRequest {
    application_id: String,
}

impl GetApplicationRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the application id is empty.
    pub fn new(application_id: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self {
            application_id: non_empty(application_id, "application id")?,
        })
    }

    /// The application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }
}

/// Request to list the service bindings of an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListApplicationServiceBindingsRequest {
    application_id: String,
    service_instance_id: Option<String>,
    page: Option<u32>,
}

impl ListApplicationServiceBindingsRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> ListApplicationServiceBindingsRequestBuilder {
        ListApplicationServiceBindingsRequestBuilder::default()
    }

    /// The application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Optional service instance filter.
    #[must_use]
    pub fn service_instance_id(&self) -> Option<&str> {
        self.service_instance_id.as_deref()
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_filter(&mut query, "service_instance_guid", self.service_instance_id());
        push_page(&mut query, self.page);
        query
    }
}

/// Builder for [`ListApplicationServiceBindingsRequest`].
#[derive(Debug, Clone, Default)]
pub struct ListApplicationServiceBindingsRequestBuilder {
    application_id: Option<String>,
    service_instance_id: Option<String>,
    page: Option<u32>,
}

impl ListApplicationServiceBindingsRequestBuilder {
    /// Sets the application identifier.
    #[must_use]
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Filters by service instance.
    #[must_use]
    pub fn service_instance_id(mut self, id: impl Into<String>) -> Self {
        self.service_instance_id = Some(id.into());
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
    pub fn build(self) -> Result<ListApplicationServiceBindingsRequest, RequestError> {
        Ok(ListApplicationServiceBindingsRequest {
            application_id: require_text(self.application_id, "application id")?,
            service_instance_id: self.service_instance_id,
            page: self.page,
        })
    }
}

/// Request to upload application bits from a prepared archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadApplicationRequest {
    application_id: String,
    application: PathBuf,
    run_async: bool,
}

impl UploadApplicationRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> UploadApplicationRequestBuilder {
        UploadApplicationRequestBuilder::default()
    }

    /// The application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Path to the application archive.
    #[must_use]
    pub fn application(&self) -> &Path {
        &self.application
    }

    /// Whether the upload is processed as a background job.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.run_async
    }
}

/// Builder for [`UploadApplicationRequest`].
#[derive(Debug, Clone, Default)]
pub struct UploadApplicationRequestBuilder {
    application_id: Option<String>,
    application: Option<PathBuf>,
    run_async: Option<bool>,
}

impl UploadApplicationRequestBuilder {
    /// Sets the application identifier.
    #[must_use]
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Sets the archive to upload.
    #[must_use]
    pub fn application(mut self, path: impl Into<PathBuf>) -> Self {
        self.application = Some(path.into());
        self
    }

    /// Requests asynchronous processing.
    #[must_use]
    pub const fn run_async(mut self, run_async: bool) -> Self {
        self.run_async = Some(run_async);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the application id or archive is missing.
    pub fn build(self) -> Result<UploadApplicationRequest, RequestError> {
        Ok(UploadApplicationRequest {
            application_id: require_text(self.application_id, "application id")?,
            application: require(self.application, "application")?,
            run_async: self.run_async.unwrap_or(true),
        })
    }
}
