//! Service binding requests and resources.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::resource::{push_filter, push_page, Query, Resource};
use crate::client::validation::require_text;
use crate::error::RequestError;

/// A service binding entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceBindingEntity {
    /// Bound application.
    #[serde(default, rename = "app_guid")]
    pub application_id: Option<String>,
    /// Bound service instance.
    #[serde(default, rename = "service_instance_guid")]
    pub service_instance_id: Option<String>,
    /// Optional binding name.
    #[serde(default)]
    pub name: Option<String>,
    /// Credentials exposed to the application.
    #[serde(default)]
    pub credentials: HashMap<String, Value>,
    /// Syslog drain URL, for log drain services.
    #[serde(default)]
    pub syslog_drain_url: Option<String>,
}

/// A service binding resource.
pub type ServiceBindingResource = Resource<ServiceBindingEntity>;

/// Request to bind a service instance to an application.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateServiceBindingRequest {
    application_id: String,
    service_instance_id: String,
    name: Option<String>,
    parameters: HashMap<String, Value>,
}

impl CreateServiceBindingRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> CreateServiceBindingRequestBuilder {
        CreateServiceBindingRequestBuilder::default()
    }

    /// The application identifier.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// The service instance identifier.
    #[must_use]
    pub fn service_instance_id(&self) -> &str {
        &self.service_instance_id
    }

    /// Optional binding name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Arbitrary parameters passed to the service broker.
    #[must_use]
    pub const fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }

    pub(crate) fn body(&self) -> Value {
        let mut body = serde_json::json!({
            "app_guid": self.application_id,
            "service_instance_guid": self.service_instance_id,
        });
        if let Some(name) = &self.name {
            body["name"] = serde_json::json!(name);
        }
        if !self.parameters.is_empty() {
            body["parameters"] = serde_json::json!(self.parameters);
        }
        body
    }
}

/// Builder for [`CreateServiceBindingRequest`].
#[derive(Debug, Clone, Default)]
pub struct CreateServiceBindingRequestBuilder {
    application_id: Option<String>,
    service_instance_id: Option<String>,
    name: Option<String>,
    parameters: HashMap<String, Value>,
}

impl CreateServiceBindingRequestBuilder {
    /// Sets the application identifier.
    #[must_use]
    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Sets the service instance identifier.
    #[must_use]
    pub fn service_instance_id(mut self, id: impl Into<String>) -> Self {
        self.service_instance_id = Some(id.into());
        self
    }

    /// Sets the binding name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a single broker parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Replaces all broker parameters.
    #[must_use]
    pub fn parameters(mut self, parameters: HashMap<String, Value>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if either identifier is missing.
    pub fn build(self) -> Result<CreateServiceBindingRequest, RequestError> {
        Ok(CreateServiceBindingRequest {
            application_id: require_text(self.application_id, "application id")?,
            service_instance_id: require_text(self.service_instance_id, "service instance id")?,
            name: self.name,
            parameters: self.parameters,
        })
    }
}

/// Request to delete a service binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteServiceBindingRequest {
    service_binding_id: String,
    run_async: bool,
}

impl DeleteServiceBindingRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> DeleteServiceBindingRequestBuilder {
        DeleteServiceBindingRequestBuilder::default()
    }

    /// The service binding identifier.
    #[must_use]
    pub fn service_binding_id(&self) -> &str {
        &self.service_binding_id
    }

    /// Whether the deletion runs as a background job.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.run_async
    }
}

/// Builder for [`DeleteServiceBindingRequest`].
#[derive(Debug, Clone, Default)]
pub struct DeleteServiceBindingRequestBuilder {
    service_binding_id: Option<String>,
    run_async: bool,
}

impl DeleteServiceBindingRequestBuilder {
    /// Sets the service binding identifier.
    #[must_use]
    pub fn service_binding_id(mut self, id: impl Into<String>) -> Self {
        self.service_binding_id = Some(id.into());
        self
    }

    /// Requests asynchronous deletion.
    #[must_use]
    pub const fn run_async(mut self, run_async: bool) -> Self {
        self.run_async = run_async;
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the binding id is missing.
    pub fn build(self) -> Result<DeleteServiceBindingRequest, RequestError> {
        Ok(DeleteServiceBindingRequest {
            service_binding_id: require_text(self.service_binding_id, "service binding id")?,
            run_async: self.run_async,
        })
    }
}

/// Request to list service bindings across the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListServiceBindingsRequest {
    application_id: Option<String>,
    service_instance_id: Option<String>,
    page: Option<u32>,
}

impl ListServiceBindingsRequest {
    /// Creates an unfiltered request for the first page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by application.
    #[must_use]
    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }

    /// Filters by service instance.
    #[must_use]
    pub fn with_service_instance_id(mut self, id: impl Into<String>) -> Self {
        self.service_instance_id = Some(id.into());
        self
    }

    /// Sets the page to fetch.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Application filter.
    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    /// Service instance filter.
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
        push_filter(&mut query, "app_guid", self.application_id.as_deref());
        push_filter(&mut query, "service_instance_guid", self.service_instance_id.as_deref());
        push_page(&mut query, self.page);
        query
    }
}
