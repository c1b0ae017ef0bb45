//! Name to identifier resolution within a space.

use crate::client::v2::{ListSpaceApplicationsRequest, ListSpaceServiceInstancesRequest};
use crate::client::CloudFoundryClient;
use crate::error::{ResolutionError, Result};

/// Resolves an application name to its identifier.
pub(crate) async fn application_id<C>(client: &C, space_id: &str, name: &str) -> Result<String>
where
    C: CloudFoundryClient + ?Sized,
{
    let request = ListSpaceApplicationsRequest::builder()
        .space_id(space_id)
        .name(name)
        .page(1)
        .build()?;

    client
        .list_space_applications(&request)
        .await?
        .resources
        .into_iter()
        .next()
        .map(|resource| resource.metadata.id)
        .ok_or_else(|| ResolutionError::not_found("Application", name).into())
}

/// Resolves a service instance name, user-provided instances included, to
/// its identifier.
pub(crate) async fn service_instance_id<C>(
    client: &C,
    space_id: &str,
    name: &str,
) -> Result<String>
where
    C: CloudFoundryClient + ?Sized,
{
    let request = ListSpaceServiceInstancesRequest::builder()
        .space_id(space_id)
        .name(name)
        .return_user_provided_service_instances(true)
        .page(1)
        .build()?;

    client
        .list_space_service_instances(&request)
        .await?
        .resources
        .into_iter()
        .next()
        .map(|resource| resource.metadata.id)
        .ok_or_else(|| ResolutionError::not_found("Service instance", name).into())
}
