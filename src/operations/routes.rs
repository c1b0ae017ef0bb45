//! Route operations.

use tracing::{debug, info};

use crate::client::v2::{self, ListDomainsRequest, ListRoutesRequest, RouteResource};
use crate::client::validation::require_text;
use crate::client::{CloudFoundryClient, Page};
use crate::error::{RequestError, ResolutionError, Result};
use crate::operations::jobs::wait_for_completion;
use crate::operations::pager::collect_pages;
use crate::operations::Context;

/// Request to delete a route identified by domain and host, path or port.
///
/// HTTP routes are addressed by host and path; TCP routes by port. A port
/// cannot be combined with a host or a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRouteRequest {
    domain: String,
    host: Option<String>,
    path: Option<String>,
    port: Option<u16>,
}

impl DeleteRouteRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> DeleteRouteRequestBuilder {
        DeleteRouteRequestBuilder::default()
    }

    /// The domain name.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The host, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// The port, if any.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Human readable route, e.g. `host.domain/path` or `domain:port`.
    #[must_use]
    pub fn route(&self) -> String {
        let mut route = match &self.host {
            Some(host) => format!("{host}.{}", self.domain),
            None => self.domain.clone(),
        };
        if let Some(path) = &self.path {
            route.push_str(path);
        }
        if let Some(port) = self.port {
            route.push_str(&format!(":{port}"));
        }
        route
    }

    fn matches(&self, route: &RouteResource) -> bool {
        route.entity.host == self.host.as_deref().unwrap_or_default()
            && route.entity.path == self.path.as_deref().unwrap_or_default()
            && route.entity.port == self.port
    }
}

/// Builder for [`DeleteRouteRequest`].
#[derive(Debug, Clone, Default)]
pub struct DeleteRouteRequestBuilder {
    domain: Option<String>,
    host: Option<String>,
    path: Option<String>,
    port: Option<u16>,
}

impl DeleteRouteRequestBuilder {
    /// Sets the domain name.
    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the port of a TCP route.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain is missing or a port is combined with
    /// a host or path.
    pub fn build(self) -> std::result::Result<DeleteRouteRequest, RequestError> {
        if self.port.is_some() {
            if self.host.is_some() {
                return Err(RequestError::conflict(
                    &["host", "port"],
                    "host and port cannot both be specified",
                ));
            }
            if self.path.is_some() {
                return Err(RequestError::conflict(
                    &["path", "port"],
                    "path and port cannot both be specified",
                ));
            }
        }

        Ok(DeleteRouteRequest {
            domain: require_text(self.domain, "domain")?,
            host: self.host,
            path: self.path,
            port: self.port,
        })
    }
}

/// Route operations.
#[derive(Debug)]
pub struct Routes<C: ?Sized> {
    context: Context<C>,
}

impl<C: CloudFoundryClient + ?Sized> Routes<C> {
    pub(crate) const fn new(context: Context<C>) -> Self {
        Self { context }
    }

    /// Deletes a route and waits for the deletion to complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the domain or route does not exist, or the
    /// deletion job fails.
    pub async fn delete(&self, request: &DeleteRouteRequest) -> Result<()> {
        let client = self.context.client.as_ref();

        let domain_id = self.domain_id(request.domain()).await?;

        let mut list = ListRoutesRequest::new().with_domain_id(domain_id);
        if let Some(host) = request.host() {
            list = list.with_host(host);
        }
        if let Some(path) = request.path() {
            list = list.with_path(path);
        }
        if let Some(port) = request.port() {
            list = list.with_port(port);
        }

        let route_id = collect_pages(|page| Self::routes_page(client, &list, page))
            .await?
            .into_iter()
            .find(|route| request.matches(route))
            .map(|route| route.metadata.id)
            .ok_or_else(|| ResolutionError::not_found("Route", request.route()))?;

        let delete = v2::DeleteRouteRequest::builder()
            .route_id(route_id)
            .run_async(true)
            .build()?;
        if let Some(job) = client.delete_route(&delete).await? {
            wait_for_completion(client, &job, self.context.polling).await?;
        }

        info!("Deleted route {}", request.route());
        Ok(())
    }

    async fn routes_page(
        client: &C,
        list: &ListRoutesRequest,
        page: u32,
    ) -> Result<Page<RouteResource>> {
        client.list_routes(&list.clone().with_page(page)).await
    }

    /// Resolves a domain name among private domains first, then shared ones.
    async fn domain_id(&self, domain: &str) -> Result<String> {
        let client = self.context.client.as_ref();
        let request = ListDomainsRequest::new().with_name(domain).with_page(1);

        if let Some(private) = client
            .list_private_domains(&request)
            .await?
            .resources
            .into_iter()
            .next()
        {
            return Ok(private.metadata.id);
        }

        debug!("{domain} is not a private domain");
        client
            .list_shared_domains(&request)
            .await?
            .resources
            .into_iter()
            .next()
            .map(|shared| shared.metadata.id)
            .ok_or_else(|| ResolutionError::not_found("Domain", domain).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::v2::{DomainEntity, JobStatus, RouteEntity};
    use crate::client::MockCloudFoundryClient;
    use crate::operations::fixtures::{job, resource};
    use crate::operations::{CloudFoundryOperations, PollingConfig};
    use std::sync::Arc;
    use std::time::Duration;

    fn operations(client: MockCloudFoundryClient) -> CloudFoundryOperations<MockCloudFoundryClient> {
        CloudFoundryOperations::new(Arc::new(client))
            .with_polling(PollingConfig::new(Duration::ZERO, Duration::from_secs(5)))
    }

    fn domains(id: &str, name: &str) -> Page<v2::DomainResource> {
        Page::single(vec![resource(
            id,
            DomainEntity {
                name: name.to_string(),
                ..DomainEntity::default()
            },
        )])
    }

    fn route(id: &str, host: &str, path: &str) -> RouteResource {
        resource(
            id,
            RouteEntity {
                host: host.to_string(),
                path: path.to_string(),
                domain_id: String::from("test-domain-id"),
                ..RouteEntity::default()
            },
        )
    }

    #[test]
    fn test_requires_domain() {
        assert_eq!(
            DeleteRouteRequest::builder().host("test-host").build(),
            Err(RequestError::MissingField { field: "domain" })
        );
    }

    #[test]
    fn test_port_conflicts() {
        let host_and_port = DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .port(9999)
            .build();
        assert!(matches!(host_and_port, Err(RequestError::Conflict { .. })));

        let path_and_port = DeleteRouteRequest::builder()
            .domain("test-domain")
            .path("/test-path")
            .port(9999)
            .build();
        assert!(matches!(path_and_port, Err(RequestError::Conflict { .. })));

        assert!(DeleteRouteRequest::builder().domain("test-domain").port(9999).build().is_ok());
        assert!(DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .path("/test-path")
            .build()
            .is_ok());
    }

    #[test]
    fn test_route_display() {
        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .path("/test-path")
            .build()
            .expect("request should be valid");
        assert_eq!(request.route(), "test-host.test-domain/test-path");

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .port(9999)
            .build()
            .expect("request should be valid");
        assert_eq!(request.route(), "test-domain:9999");
    }

    #[tokio::test]
    async fn test_delete_shared_domain_route() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_private_domains()
            .withf(|r| r.name() == Some("test-domain"))
            .times(1)
            .returning(|_| Ok(Page::default()));
        client
            .expect_list_shared_domains()
            .withf(|r| r.name() == Some("test-domain"))
            .times(1)
            .returning(|_| Ok(domains("test-domain-id", "test-domain")));
        client
            .expect_list_routes()
            .withf(|r| r.domain_id() == Some("test-domain-id"))
            .times(1)
            .returning(|_| {
                Ok(Page::single(vec![
                    route("test-other-route-id", "test-host", "/other"),
                    route("test-route-id", "test-host", ""),
                ]))
            });
        client
            .expect_delete_route()
            .withf(|r| r.route_id() == "test-route-id" && r.is_async())
            .times(1)
            .returning(|_| Ok(Some(job("test-job-id", JobStatus::Queued))));
        client
            .expect_get_job()
            .times(1)
            .returning(|_| Ok(job("test-job-id", JobStatus::Finished)));

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .build()
            .expect("request should be valid");
        tokio_test::assert_ok!(operations(client).routes().delete(&request).await);
    }

    #[tokio::test]
    async fn test_delete_private_domain_route_without_job() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_private_domains()
            .times(1)
            .returning(|_| Ok(domains("test-domain-id", "test-domain")));
        client.expect_list_shared_domains().never();
        client
            .expect_list_routes()
            .times(1)
            .returning(|_| Ok(Page::single(vec![route("test-route-id", "test-host", "")])));
        client
            .expect_delete_route()
            .times(1)
            .returning(|_| Ok(None));
        client.expect_get_job().never();

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .build()
            .expect("request should be valid");
        tokio_test::assert_ok!(operations(client).routes().delete(&request).await);
    }

    #[tokio::test]
    async fn test_delete_route_on_later_page() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_private_domains()
            .returning(|_| Ok(domains("test-domain-id", "test-domain")));
        client
            .expect_list_routes()
            .withf(|r| r.page() == Some(1))
            .times(1)
            .returning(|_| {
                Ok(Page {
                    total_results: 2,
                    total_pages: 2,
                    prev_url: None,
                    next_url: Some(String::from("/v2/routes?page=2")),
                    resources: vec![route("test-other-route-id", "test-host", "")],
                })
            });
        client
            .expect_list_routes()
            .withf(|r| r.page() == Some(2))
            .times(1)
            .returning(|_| {
                Ok(Page {
                    total_results: 2,
                    total_pages: 2,
                    prev_url: Some(String::from("/v2/routes?page=1")),
                    next_url: None,
                    resources: vec![route("test-route-id", "", "")],
                })
            });
        client
            .expect_delete_route()
            .withf(|r| r.route_id() == "test-route-id")
            .times(1)
            .returning(|_| Ok(None));

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .build()
            .expect("request should be valid");
        tokio_test::assert_ok!(operations(client).routes().delete(&request).await);
    }

    #[tokio::test]
    async fn test_delete_unknown_domain() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_private_domains()
            .returning(|_| Ok(Page::default()));
        client
            .expect_list_shared_domains()
            .returning(|_| Ok(Page::default()));
        client.expect_list_routes().never();

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .build()
            .expect("request should be valid");
        let err = tokio_test::assert_err!(operations(client).routes().delete(&request).await);
        assert_eq!(err.to_string(), "Domain test-domain does not exist");
    }

    #[tokio::test]
    async fn test_delete_unknown_route() {
        let mut client = MockCloudFoundryClient::new();
        client
            .expect_list_private_domains()
            .returning(|_| Ok(domains("test-domain-id", "test-domain")));
        client
            .expect_list_routes()
            .returning(|_| Ok(Page::default()));
        client.expect_delete_route().never();

        let request = DeleteRouteRequest::builder()
            .domain("test-domain")
            .host("test-host")
            .path("/test-path")
            .build()
            .expect("request should be valid");
        let err = tokio_test::assert_err!(operations(client).routes().delete(&request).await);
        assert_eq!(
            err.to_string(),
            "Route test-host.test-domain/test-path does not exist"
        );
    }
}
