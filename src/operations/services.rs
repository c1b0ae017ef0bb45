//! Service instance operations.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, info};

use crate::client::v2::{
    CreateServiceBindingRequest, DeleteServiceBindingRequest, GetApplicationRequest,
    GetServicePlanRequest, GetServiceRequest, ListApplicationServiceBindingsRequest,
    ListServiceBindingsRequest, ListSpaceServiceInstancesRequest, ServiceBindingResource,
    ServiceInstanceResource, ServiceInstanceType,
};
use crate::client::validation::require_text;
use crate::client::{CloudFoundryClient, Page};
use crate::error::{RequestError, ResolutionError, Result};
use crate::operations::jobs::wait_for_completion;
use crate::operations::pager::collect_pages;
use crate::operations::{lookup, Context};

fn as_display<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// A service instance of the targeted space, with its bindings resolved to
/// application names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInstance {
    /// Instance identifier.
    pub id: String,
    /// Instance name.
    pub name: String,
    /// `user-provided` or `managed`.
    #[serde(rename = "type", serialize_with = "as_display")]
    pub instance_type: ServiceInstanceType,
    /// Names of the bound applications.
    pub applications: Vec<String>,
    /// Plan name, managed instances only.
    pub plan: Option<String>,
    /// Service label, managed instances only.
    pub service: Option<String>,
    /// Last broker operation as `"<type> <state>"`.
    pub last_operation: Option<String>,
}

/// Request to bind a service instance to an application by name.
#[derive(Debug, Clone, PartialEq)]
pub struct BindServiceInstanceRequest {
    application_name: String,
    service_instance_name: String,
    parameters: HashMap<String, Value>,
}

impl BindServiceInstanceRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> BindServiceInstanceRequestBuilder {
        BindServiceInstanceRequestBuilder::default()
    }

    /// The application name.
    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// The service instance name.
    #[must_use]
    pub fn service_instance_name(&self) -> &str {
        &self.service_instance_name
    }

    /// Parameters passed to the service broker.
    #[must_use]
    pub const fn parameters(&self) -> &HashMap<String, Value> {
        &self.parameters
    }
}

/// Builder for [`BindServiceInstanceRequest`].
#[derive(Debug, Clone, Default)]
pub struct BindServiceInstanceRequestBuilder {
    application_name: Option<String>,
    service_instance_name: Option<String>,
    parameters: HashMap<String, Value>,
}

impl BindServiceInstanceRequestBuilder {
    /// Sets the application name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Sets the service instance name.
    #[must_use]
    pub fn service_instance_name(mut self, name: impl Into<String>) -> Self {
        self.service_instance_name = Some(name.into());
        self
    }

    /// Adds a broker parameter.
    #[must_use]
    pub fn parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Adds several broker parameters.
    #[must_use]
    pub fn parameters(mut self, parameters: HashMap<String, Value>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is missing.
    pub fn build(self) -> std::result::Result<BindServiceInstanceRequest, RequestError> {
        Ok(BindServiceInstanceRequest {
            application_name: require_text(self.application_name, "application name")?,
            service_instance_name: require_text(
                self.service_instance_name,
                "service instance name",
            )?,
            parameters: self.parameters,
        })
    }
}

/// Request to unbind a service instance from an application by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnbindServiceInstanceRequest {
    application_name: String,
    service_instance_name: String,
}

impl UnbindServiceInstanceRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> UnbindServiceInstanceRequestBuilder {
        UnbindServiceInstanceRequestBuilder::default()
    }

    /// The application name.
    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// The service instance name.
    #[must_use]
    pub fn service_instance_name(&self) -> &str {
        &self.service_instance_name
    }
}

/// Builder for [`UnbindServiceInstanceRequest`].
#[derive(Debug, Clone, Default)]
pub struct UnbindServiceInstanceRequestBuilder {
    application_name: Option<String>,
    service_instance_name: Option<String>,
}

impl UnbindServiceInstanceRequestBuilder {
    /// Sets the application name.
    #[must_use]
    pub fn application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Sets the service instance name.
    #[must_use]
    pub fn service_instance_name(mut self, name: impl Into<String>) -> Self {
        self.service_instance_name = Some(name.into());
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if either name is missing.
    pub fn build(self) -> std::result::Result<UnbindServiceInstanceRequest, RequestError> {
        Ok(UnbindServiceInstanceRequest {
            application_name: require_text(self.application_name, "application name")?,
            service_instance_name: require_text(
                self.service_instance_name,
                "service instance name",
            )?,
        })
    }
}

/// Service instance operations in the targeted space.
#[derive(Debug)]
pub struct Services<C: ?Sized> {
    context: Context<C>,
}

impl<C: CloudFoundryClient + ?Sized> Services<C> {
    pub(crate) const fn new(context: Context<C>) -> Self {
        Self { context }
    }

    /// Binds a service instance to an application.
    ///
    /// # Errors
    ///
    /// Returns an error if no space is targeted, either name does not
    /// resolve, or the platform rejects the binding.
    pub async fn bind(&self, request: &BindServiceInstanceRequest) -> Result<()> {
        let space_id = self.context.space_id()?;
        let client = self.context.client.as_ref();

        let (application_id, service_instance_id) = tokio::try_join!(
            lookup::application_id(client, space_id, request.application_name()),
            lookup::service_instance_id(client, space_id, request.service_instance_name()),
        )?;

        let create = CreateServiceBindingRequest::builder()
            .application_id(application_id)
            .service_instance_id(service_instance_id)
            .parameters(request.parameters().clone())
            .build()?;
        let binding = client.create_service_binding(&create).await?;

        info!(
            "Bound service instance {} to application {} ({})",
            request.service_instance_name(),
            request.application_name(),
            binding.id()
        );
        Ok(())
    }

    /// Removes the binding between a service instance and an application
    /// and waits for the deletion to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if no space is targeted, either name does not
    /// resolve, the two are not bound, or the deletion job fails.
    pub async fn unbind(&self, request: &UnbindServiceInstanceRequest) -> Result<()> {
        let space_id = self.context.space_id()?;
        let client = self.context.client.as_ref();

        let (application_id, service_instance_id) = tokio::try_join!(
            lookup::application_id(client, space_id, request.application_name()),
            lookup::service_instance_id(client, space_id, request.service_instance_name()),
        )?;

        let list = ListApplicationServiceBindingsRequest::builder()
            .application_id(application_id)
            .service_instance_id(service_instance_id)
            .page(1)
            .build()?;
        let binding_id = client
            .list_application_service_bindings(&list)
            .await?
            .resources
            .into_iter()
            .next()
            .map(|binding| binding.metadata.id)
            .ok_or_else(|| ResolutionError::NotBound {
                service_instance: request.service_instance_name().to_string(),
                application: request.application_name().to_string(),
            })?;

        let delete = DeleteServiceBindingRequest::builder()
            .service_binding_id(binding_id)
            .run_async(true)
            .build()?;
        if let Some(job) = client.delete_service_binding(&delete).await? {
            wait_for_completion(client, &job, self.context.polling).await?;
        }

        info!(
            "Unbound service instance {} from application {}",
            request.service_instance_name(),
            request.application_name()
        );
        Ok(())
    }

    /// Lists every service instance of the targeted space, user-provided
    /// ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if no space is targeted or any call fails.
    pub async fn list_instances(&self) -> Result<Vec<ServiceInstance>> {
        let space_id = self.context.space_id()?;

        let resources = collect_pages(|page| self.instances_page(space_id, page)).await?;
        debug!("Found {} service instances in space {space_id}", resources.len());

        let mut instances = Vec::with_capacity(resources.len());
        for resource in resources {
            instances.push(self.describe(resource).await?);
        }
        Ok(instances)
    }

    async fn instances_page(
        &self,
        space_id: &str,
        page: u32,
    ) -> Result<Page<ServiceInstanceResource>> {
        let request = ListSpaceServiceInstancesRequest::builder()
            .space_id(space_id)
            .return_user_provided_service_instances(true)
            .page(page)
            .build()?;
        self.context.client.list_space_service_instances(&request).await
    }

    async fn bindings_page(
        &self,
        service_instance_id: &str,
        page: u32,
    ) -> Result<Page<ServiceBindingResource>> {
        let request = ListServiceBindingsRequest::new()
            .with_service_instance_id(service_instance_id)
            .with_page(page);
        self.context.client.list_service_bindings(&request).await
    }

    async fn describe(&self, resource: ServiceInstanceResource) -> Result<ServiceInstance> {
        let client = self.context.client.as_ref();
        let id = resource.metadata.id;
        let entity = resource.entity;

        let bindings = collect_pages(|page| self.bindings_page(&id, page)).await?;
        let mut applications = Vec::with_capacity(bindings.len());
        for application_id in bindings.into_iter().filter_map(|b| b.entity.application_id) {
            let application = client
                .get_application(&GetApplicationRequest::new(application_id)?)
                .await?;
            applications.push(application.entity.name);
        }

        let (plan, service) = match entity.service_plan_id {
            Some(plan_id) => {
                let plan = client
                    .get_service_plan(&GetServicePlanRequest::new(plan_id)?)
                    .await?;
                let service = client
                    .get_service(&GetServiceRequest::new(plan.entity.service_id)?)
                    .await?;
                (Some(plan.entity.name), Some(service.entity.label))
            }
            None => (None, None),
        };

        Ok(ServiceInstance {
            id,
            name: entity.name,
            instance_type: entity.instance_type,
            applications,
            plan,
            service,
            last_operation: entity.last_operation.map(|op| op.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::v2::{
        ErrorDetails, JobStatus, LastOperation, ServiceBindingEntity, ServiceEntity,
        ServiceInstanceEntity, ServicePlanEntity,
    };
    use crate::client::MockCloudFoundryClient;
    use crate::error::{CfError, OperationError};
    use crate::operations::fixtures::{applications, job, resource, TEST_SPACE_ID};
    use crate::operations::{CloudFoundryOperations, PollingConfig};
    use mockall::Sequence;
    use std::sync::Arc;
    use std::time::Duration;

    fn operations(client: MockCloudFoundryClient) -> CloudFoundryOperations<MockCloudFoundryClient> {
        CloudFoundryOperations::new(Arc::new(client))
            .with_space_id(TEST_SPACE_ID)
            .with_polling(PollingConfig::new(Duration::ZERO, Duration::from_secs(5)))
    }

    fn service_instance(
        id: &str,
        name: &str,
        instance_type: ServiceInstanceType,
        service_plan_id: Option<&str>,
        last_operation: Option<LastOperation>,
    ) -> ServiceInstanceResource {
        resource(
            id,
            ServiceInstanceEntity {
                name: name.to_string(),
                instance_type,
                service_plan_id: service_plan_id.map(ToString::to_string),
                space_id: Some(TEST_SPACE_ID.to_string()),
                last_operation,
                dashboard_url: None,
                credentials: HashMap::new(),
                tags: Vec::new(),
            },
        )
    }

    fn request_applications(client: &mut MockCloudFoundryClient, found: bool) {
        client
            .expect_list_space_applications()
            .withf(|r| {
                r.space_id() == TEST_SPACE_ID
                    && r.name() == Some("test-application-name")
                    && r.page() == Some(1)
            })
            .returning(move |_| {
                Ok(if found {
                    applications("test-application-id", "test-application-name")
                } else {
                    Page::default()
                })
            });
    }

    fn request_service_instance(client: &mut MockCloudFoundryClient, found: bool) {
        client
            .expect_list_space_service_instances()
            .withf(|r| {
                r.space_id() == TEST_SPACE_ID
                    && r.name() == Some("test-service-instance-name")
                    && r.includes_user_provided()
                    && r.page() == Some(1)
            })
            .returning(move |_| {
                Ok(if found {
                    Page::single(vec![service_instance(
                        "test-service-instance-id",
                        "test-service-instance-name",
                        ServiceInstanceType::Managed,
                        None,
                        None,
                    )])
                } else {
                    Page::default()
                })
            });
    }

    fn request_service_binding(client: &mut MockCloudFoundryClient) {
        client
            .expect_list_application_service_bindings()
            .withf(|r| {
                r.application_id() == "test-application-id"
                    && r.service_instance_id() == Some("test-service-instance-id")
                    && r.page() == Some(1)
            })
            .times(1)
            .returning(|_| {
                Ok(Page::single(vec![resource(
                    "test-service-binding-id",
                    ServiceBindingEntity::default(),
                )]))
            });
        client
            .expect_delete_service_binding()
            .withf(|r| r.service_binding_id() == "test-service-binding-id" && r.is_async())
            .times(1)
            .returning(|_| Ok(Some(job("test-job-id", JobStatus::Queued))));
    }

    fn bind_request() -> BindServiceInstanceRequest {
        BindServiceInstanceRequest::builder()
            .application_name("test-application-name")
            .service_instance_name("test-service-instance-name")
            .parameter("test-parameter-key", "test-parameter-value")
            .build()
            .expect("request should be valid")
    }

    fn unbind_request() -> UnbindServiceInstanceRequest {
        UnbindServiceInstanceRequest::builder()
            .application_name("test-application-name")
            .service_instance_name("test-service-instance-name")
            .build()
            .expect("request should be valid")
    }

    #[tokio::test]
    async fn test_bind() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, true);
        request_service_instance(&mut client, true);
        client
            .expect_create_service_binding()
            .withf(|r| {
                r.application_id() == "test-application-id"
                    && r.service_instance_id() == "test-service-instance-id"
                    && r.parameters().get("test-parameter-key")
                        == Some(&Value::from("test-parameter-value"))
            })
            .times(1)
            .returning(|_| Ok(resource("test-service-binding-id", ServiceBindingEntity::default())));

        let ops = operations(client);
        tokio_test::assert_ok!(ops.services().bind(&bind_request()).await);
    }

    #[tokio::test]
    async fn test_bind_no_application() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, false);
        request_service_instance(&mut client, true);
        client.expect_create_service_binding().never();

        let ops = operations(client);
        let err = tokio_test::assert_err!(ops.services().bind(&bind_request()).await);
        assert_eq!(err.to_string(), "Application test-application-name does not exist");
    }

    #[tokio::test]
    async fn test_bind_no_service_instance() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, true);
        request_service_instance(&mut client, false);
        client.expect_create_service_binding().never();

        let ops = operations(client);
        let err = tokio_test::assert_err!(ops.services().bind(&bind_request()).await);
        assert_eq!(
            err.to_string(),
            "Service instance test-service-instance-name does not exist"
        );
    }

    #[tokio::test]
    async fn test_bind_no_space() {
        let client = MockCloudFoundryClient::new();
        let ops = CloudFoundryOperations::new(Arc::new(client));
        let err = tokio_test::assert_err!(ops.services().bind(&bind_request()).await);
        assert!(matches!(
            err,
            CfError::Operation(OperationError::NoTarget { target: "space" })
        ));
        assert_eq!(err.to_string(), "no space targeted");
    }

    #[tokio::test]
    async fn test_unbind() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, true);
        request_service_instance(&mut client, true);
        request_service_binding(&mut client);

        let mut seq = Sequence::new();
        client
            .expect_get_job()
            .withf(|r| r.job_id() == "test-job-id")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(job("test-job-id", JobStatus::Running)));
        client
            .expect_get_job()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(job("test-job-id", JobStatus::Finished)));

        let ops = operations(client);
        tokio_test::assert_ok!(ops.services().unbind(&unbind_request()).await);
    }

    #[tokio::test]
    async fn test_unbind_job_failure() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, true);
        request_service_instance(&mut client, true);
        request_service_binding(&mut client);

        let mut seq = Sequence::new();
        client
            .expect_get_job()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(job("test-job-id", JobStatus::Running)));
        client
            .expect_get_job()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                let mut failed = job("test-job-id", JobStatus::Failed);
                failed.entity.error_details = Some(ErrorDetails {
                    code: 1,
                    description: String::from("test-error-details-description"),
                    error_code: String::from("test-error-details-errorCode"),
                });
                Ok(failed)
            });

        let ops = operations(client);
        let err = tokio_test::assert_err!(ops.services().unbind(&unbind_request()).await);
        assert_eq!(
            err.to_string(),
            "test-error-details-errorCode(1): test-error-details-description"
        );
    }

    #[tokio::test]
    async fn test_unbind_not_bound() {
        let mut client = MockCloudFoundryClient::new();
        request_applications(&mut client, true);
        request_service_instance(&mut client, true);
        client
            .expect_list_application_service_bindings()
            .times(1)
            .returning(|_| Ok(Page::default()));
        client.expect_delete_service_binding().never();

        let ops = operations(client);
        let err = tokio_test::assert_err!(ops.services().unbind(&unbind_request()).await);
        assert_eq!(
            err.to_string(),
            "Service instance test-service-instance-name is not bound to application test-application-name"
        );
    }

    #[test]
    fn test_unbind_invalid_request() {
        let err = UnbindServiceInstanceRequest::builder()
            .service_instance_name("test-service-instance-name")
            .build()
            .expect_err("application name is required");
        assert_eq!(
            CfError::from(err).to_string(),
            "Request is invalid: application name must be specified"
        );
    }

    #[tokio::test]
    async fn test_unbind_no_space() {
        let client = MockCloudFoundryClient::new();
        let ops = CloudFoundryOperations::new(Arc::new(client));
        let err = tokio_test::assert_err!(ops.services().unbind(&unbind_request()).await);
        assert_eq!(err.to_string(), "no space targeted");
    }

    #[tokio::test]
    async fn test_list_instances() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_space_service_instances()
            .withf(|r| r.space_id() == TEST_SPACE_ID && r.name().is_none() && r.includes_user_provided())
            .times(1)
            .returning(|_| {
                Ok(Page::single(vec![
                    service_instance(
                        "test-service-instance1-id",
                        "test-service-instance1",
                        ServiceInstanceType::UserProvided,
                        None,
                        None,
                    ),
                    service_instance(
                        "test-service-instance2-id",
                        "test-service-instance2",
                        ServiceInstanceType::Managed,
                        Some("test-service-instance2-plan-id"),
                        Some(LastOperation {
                            operation_type: String::from("create"),
                            state: String::from("successful"),
                            ..LastOperation::default()
                        }),
                    ),
                ]))
            });
        client
            .expect_list_service_bindings()
            .withf(|r| r.service_instance_id() == Some("test-service-instance1-id"))
            .times(1)
            .returning(|_| Ok(Page::default()));
        client
            .expect_list_service_bindings()
            .withf(|r| r.service_instance_id() == Some("test-service-instance2-id"))
            .times(1)
            .returning(|_| {
                Ok(Page::single(vec![resource(
                    "test-service-binding-id",
                    ServiceBindingEntity {
                        application_id: Some(String::from("test-application-id")),
                        ..ServiceBindingEntity::default()
                    },
                )]))
            });
        client
            .expect_get_application()
            .withf(|r| r.application_id() == "test-application-id")
            .times(1)
            .returning(|_| {
                Ok(crate::operations::fixtures::application(
                    "test-application-id",
                    "test-application",
                ))
            });
        client
            .expect_get_service_plan()
            .withf(|r| r.service_plan_id() == "test-service-instance2-plan-id")
            .times(1)
            .returning(|_| {
                Ok(resource(
                    "test-service-instance2-plan-id",
                    ServicePlanEntity {
                        name: String::from("test-service-plan"),
                        service_id: String::from("test-service-id"),
                        ..ServicePlanEntity::default()
                    },
                ))
            });
        client
            .expect_get_service()
            .withf(|r| r.service_id() == "test-service-id")
            .times(1)
            .returning(|_| {
                Ok(resource(
                    "test-service-id",
                    ServiceEntity {
                        label: String::from("test-service"),
                        ..ServiceEntity::default()
                    },
                ))
            });

        let ops = operations(client);
        let instances = tokio_test::assert_ok!(ops.services().list_instances().await);
        assert_eq!(
            instances,
            vec![
                ServiceInstance {
                    id: String::from("test-service-instance1-id"),
                    name: String::from("test-service-instance1"),
                    instance_type: ServiceInstanceType::UserProvided,
                    applications: Vec::new(),
                    plan: None,
                    service: None,
                    last_operation: None,
                },
                ServiceInstance {
                    id: String::from("test-service-instance2-id"),
                    name: String::from("test-service-instance2"),
                    instance_type: ServiceInstanceType::Managed,
                    applications: vec![String::from("test-application")],
                    plan: Some(String::from("test-service-plan")),
                    service: Some(String::from("test-service")),
                    last_operation: Some(String::from("create successful")),
                },
            ]
        );

        let json = serde_json::to_value(&instances[1]).expect("serialize");
        assert_eq!(json["type"], "managed");
    }

    #[tokio::test]
    async fn test_list_instances_none() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_space_service_instances()
            .times(1)
            .returning(|_| Ok(Page::default()));

        let ops = operations(client);
        let instances = tokio_test::assert_ok!(ops.services().list_instances().await);
        assert!(instances.is_empty());
    }

    #[tokio::test]
    async fn test_list_instances_no_space() {
        let client = MockCloudFoundryClient::new();
        let ops = CloudFoundryOperations::new(Arc::new(client));
        let err = tokio_test::assert_err!(ops.services().list_instances().await);
        assert_eq!(err.to_string(), "no space targeted");
    }
}
