//! The cloud controller client interface.

use async_trait::async_trait;

use crate::client::resource::{Page, PageV3, ToOneRelationship};
use crate::client::v2::{
    ApplicationResource, BuildpackResource, CreateServiceBindingRequest, DeleteRouteRequest,
    DeleteServiceBindingRequest, DomainResource, FeatureFlag, GetApplicationRequest,
    GetFeatureFlagRequest, GetJobRequest, GetServicePlanRequest, GetServiceRequest, JobResource,
    ListApplicationServiceBindingsRequest, ListDomainsRequest, ListRoutesRequest,
    ListServiceBindingsRequest, ListSpaceApplicationsRequest, ListSpaceServiceInstancesRequest,
    RouteResource, ServiceBindingResource, ServiceInstanceResource, ServicePlanResource,
    ServiceResource, UploadApplicationRequest, UploadBuildpackRequest,
};
use crate::client::v3::{
    AssignSpaceIsolationSegmentRequest, CancelTaskRequest, CopyPackageRequest,
    ListApplicationTasksRequest, PackageResource, TaskResource,
};
use crate::error::Result;

/// Typed access to the cloud controller v2 and v3 APIs.
///
/// Each method maps to one REST call. List methods return a single page;
/// callers walk `total_pages` themselves. Delete methods return the job
/// when the platform processes the deletion in the background.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CloudFoundryClient: Send + Sync {
    /// `GET /v2/apps/{id}`
    async fn get_application(&self, request: &GetApplicationRequest)
        -> Result<ApplicationResource>;

    /// `GET /v2/apps/{id}/service_bindings`
    async fn list_application_service_bindings(
        &self,
        request: &ListApplicationServiceBindingsRequest,
    ) -> Result<Page<ServiceBindingResource>>;

    /// `PUT /v2/apps/{id}/bits`
    async fn upload_application(&self, request: &UploadApplicationRequest)
        -> Result<JobResource>;

    /// `PUT /v2/buildpacks/{id}/bits`
    async fn upload_buildpack(&self, request: &UploadBuildpackRequest)
        -> Result<BuildpackResource>;

    /// `GET /v2/config/feature_flags/{name}`
    async fn get_feature_flag(&self, request: &GetFeatureFlagRequest) -> Result<FeatureFlag>;

    /// `GET /v2/jobs/{id}`
    async fn get_job(&self, request: &GetJobRequest) -> Result<JobResource>;

    /// `POST /v2/service_bindings`
    async fn create_service_binding(
        &self,
        request: &CreateServiceBindingRequest,
    ) -> Result<ServiceBindingResource>;

    /// `DELETE /v2/service_bindings/{id}`
    async fn delete_service_binding(
        &self,
        request: &DeleteServiceBindingRequest,
    ) -> Result<Option<JobResource>>;

    /// `GET /v2/service_bindings`
    async fn list_service_bindings(
        &self,
        request: &ListServiceBindingsRequest,
    ) -> Result<Page<ServiceBindingResource>>;

    /// `GET /v2/service_plans/{id}`
    async fn get_service_plan(&self, request: &GetServicePlanRequest)
        -> Result<ServicePlanResource>;

    /// `GET /v2/services/{id}`
    async fn get_service(&self, request: &GetServiceRequest) -> Result<ServiceResource>;

    /// `GET /v2/spaces/{id}/apps`
    async fn list_space_applications(
        &self,
        request: &ListSpaceApplicationsRequest,
    ) -> Result<Page<ApplicationResource>>;

    /// `GET /v2/spaces/{id}/service_instances`
    async fn list_space_service_instances(
        &self,
        request: &ListSpaceServiceInstancesRequest,
    ) -> Result<Page<ServiceInstanceResource>>;

    /// `GET /v2/private_domains`
    async fn list_private_domains(&self, request: &ListDomainsRequest)
        -> Result<Page<DomainResource>>;

    /// `GET /v2/shared_domains`
    async fn list_shared_domains(&self, request: &ListDomainsRequest)
        -> Result<Page<DomainResource>>;

    /// `GET /v2/routes`
    async fn list_routes(&self, request: &ListRoutesRequest) -> Result<Page<RouteResource>>;

    /// `DELETE /v2/routes/{id}`
    async fn delete_route(&self, request: &DeleteRouteRequest) -> Result<Option<JobResource>>;

    /// `POST /v3/packages?source_guid={id}`
    async fn copy_package(&self, request: &CopyPackageRequest) -> Result<PackageResource>;

    /// `PATCH /v3/spaces/{id}/relationships/isolation_segment`
    async fn assign_space_isolation_segment(
        &self,
        request: &AssignSpaceIsolationSegmentRequest,
    ) -> Result<ToOneRelationship>;

    /// `GET /v3/apps/{id}/tasks`
    async fn list_application_tasks(
        &self,
        request: &ListApplicationTasksRequest,
    ) -> Result<PageV3<TaskResource>>;

    /// `POST /v3/tasks/{id}/actions/cancel`
    async fn cancel_task(&self, request: &CancelTaskRequest) -> Result<TaskResource>;
}
