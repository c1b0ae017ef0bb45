//! Service and service plan requests and resources.

use serde::{Deserialize, Serialize};

use crate::client::resource::Resource;
use crate::client::validation::non_empty;
use crate::error::RequestError;

/// A service offering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntity {
    /// Service label shown in the marketplace.
    pub label: String,
    /// Service description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the service can be provisioned.
    #[serde(default)]
    pub active: Option<bool>,
    /// Whether instances can be bound.
    #[serde(default)]
    pub bindable: Option<bool>,
    /// Owning broker.
    #[serde(default, rename = "service_broker_guid")]
    pub service_broker_id: Option<String>,
}

/// A service resource.
pub type ServiceResource = Resource<ServiceEntity>;

/// A service plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePlanEntity {
    /// Plan name.
    pub name: String,
    /// Service the plan belongs to.
    #[serde(rename = "service_guid")]
    pub service_id: String,
    /// Plan description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the plan is free.
    #[serde(default)]
    pub free: Option<bool>,
    /// Whether the plan is visible to every organization.
    #[serde(default)]
    pub public: Option<bool>,
}

/// A service plan resource.
pub type ServicePlanResource = Resource<ServicePlanEntity>;

/// Request to fetch a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetServiceRequest {
    service_id: String,
}

impl GetServiceRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the service id is empty.
    pub fn new(service_id: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self {
            service_id: non_empty(service_id, "service id")?,
        })
    }

    /// The service identifier.
    #[must_use]
    pub fn service_id(&self) -> &str {
        &self.service_id
    }
}

/// Request to fetch a service plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetServicePlanRequest {
    service_plan_id: String,
}

impl GetServicePlanRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the service plan id is empty.
    pub fn new(service_plan_id: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self {
            service_plan_id: non_empty(service_plan_id, "service plan id")?,
        })
    }

    /// The service plan identifier.
    #[must_use]
    pub fn service_plan_id(&self) -> &str {
        &self.service_plan_id
    }
}
