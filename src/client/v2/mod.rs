//! Cloud controller v2 requests and resources.

mod applications;
mod buildpacks;
mod feature_flags;
mod jobs;
mod routes;
mod service_bindings;
mod service_instances;
mod services;
mod spaces;

pub use applications::{
    ApplicationEntity, ApplicationResource, GetApplicationRequest,
    ListApplicationServiceBindingsRequest, ListApplicationServiceBindingsRequestBuilder,
    UploadApplicationRequest, UploadApplicationRequestBuilder,
};
pub use buildpacks::{
    BuildpackEntity, BuildpackResource, UploadBuildpackRequest, UploadBuildpackRequestBuilder,
};
pub use feature_flags::{FeatureFlag, GetFeatureFlagRequest};
pub use jobs::{ErrorDetails, GetJobRequest, JobEntity, JobResource, JobStatus};
pub use routes::{
    DeleteRouteRequest, DeleteRouteRequestBuilder, DomainEntity, DomainResource,
    ListDomainsRequest, ListRoutesRequest, RouteEntity, RouteResource,
};
pub use service_bindings::{
    CreateServiceBindingRequest, CreateServiceBindingRequestBuilder, DeleteServiceBindingRequest,
    DeleteServiceBindingRequestBuilder, ListServiceBindingsRequest, ServiceBindingEntity,
    ServiceBindingResource,
};
pub use service_instances::{
    LastOperation, ServiceInstanceEntity, ServiceInstanceResource, ServiceInstanceType,
};
pub use services::{
    GetServicePlanRequest, GetServiceRequest, ServiceEntity, ServicePlanEntity,
    ServicePlanResource, ServiceResource,
};
pub use spaces::{
    ListSpaceApplicationsRequest, ListSpaceApplicationsRequestBuilder,
    ListSpaceServiceInstancesRequest, ListSpaceServiceInstancesRequestBuilder,
};
