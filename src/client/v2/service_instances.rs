//! Service instance resources.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::client::resource::Resource;

/// Kind of a service instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceInstanceType {
    /// Credentials supplied directly by a user.
    #[serde(rename = "user_provided_service_instance")]
    UserProvided,
    /// Provisioned through a service broker.
    #[serde(rename = "managed_service_instance")]
    Managed,
}

impl std::fmt::Display for ServiceInstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::UserProvided => "user-provided",
            Self::Managed => "managed",
        };
        write!(f, "{kind}")
    }
}

/// The last broker operation performed on a managed instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastOperation {
    /// Operation type (`create`, `update`, `delete`).
    #[serde(rename = "type")]
    pub operation_type: String,
    /// Operation state (`in progress`, `succeeded`, `failed`).
    pub state: String,
    /// Broker supplied description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the operation last changed.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl std::fmt::Display for LastOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.operation_type, self.state)
    }
}

/// A service instance entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstanceEntity {
    /// Instance name.
    pub name: String,
    /// Instance kind.
    #[serde(rename = "type")]
    pub instance_type: ServiceInstanceType,
    /// Plan of a managed instance.
    #[serde(default, rename = "service_plan_guid")]
    pub service_plan_id: Option<String>,
    /// Owning space.
    #[serde(default, rename = "space_guid")]
    pub space_id: Option<String>,
    /// Last broker operation.
    #[serde(default)]
    pub last_operation: Option<LastOperation>,
    /// Dashboard URL provided by the broker.
    #[serde(default)]
    pub dashboard_url: Option<String>,
    /// Credentials of a user-provided instance.
    #[serde(default)]
    pub credentials: HashMap<String, Value>,
    /// Instance tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A service instance resource.
pub type ServiceInstanceResource = Resource<ServiceInstanceEntity>;
