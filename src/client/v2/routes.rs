//! Domain and route requests and resources.

use serde::{Deserialize, Serialize};

use crate::client::resource::{push_filter, push_page, Query, Resource};
use crate::client::validation::require_text;
use crate::error::RequestError;

/// A domain entity, private or shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntity {
    /// Domain name.
    pub name: String,
    /// Owning organization of a private domain.
    #[serde(default, rename = "owning_organization_guid")]
    pub owning_organization_id: Option<String>,
    /// Router group of a TCP domain.
    #[serde(default, rename = "router_group_guid")]
    pub router_group_id: Option<String>,
}

/// A domain resource.
pub type DomainResource = Resource<DomainEntity>;

/// A route entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntity {
    /// Host name, empty for a domain-only route.
    #[serde(default)]
    pub host: String,
    /// Path, empty when unset.
    #[serde(default)]
    pub path: String,
    /// Port of a TCP route.
    #[serde(default)]
    pub port: Option<u16>,
    /// Domain of the route.
    #[serde(rename = "domain_guid")]
    pub domain_id: String,
    /// Owning space.
    #[serde(default, rename = "space_guid")]
    pub space_id: Option<String>,
}

/// A route resource.
pub type RouteResource = Resource<RouteEntity>;

/// Request to list private or shared domains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDomainsRequest {
    name: Option<String>,
    page: Option<u32>,
}

impl ListDomainsRequest {
    /// Creates an unfiltered request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by domain name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the page to fetch.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Name filter.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_filter(&mut query, "name", self.name.as_deref());
        push_page(&mut query, self.page);
        query
    }
}

/// Request to list routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRoutesRequest {
    domain_id: Option<String>,
    host: Option<String>,
    path: Option<String>,
    port: Option<u16>,
    page: Option<u32>,
}

impl ListRoutesRequest {
    /// Creates an unfiltered request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by domain.
    #[must_use]
    pub fn with_domain_id(mut self, id: impl Into<String>) -> Self {
        self.domain_id = Some(id.into());
        self
    }

    /// Filters by host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Filters by path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Filters by port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the page to fetch.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Domain filter.
    #[must_use]
    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    /// The requested page, if any.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_filter(&mut query, "domain_guid", self.domain_id.as_deref());
        push_filter(&mut query, "host", self.host.as_deref());
        push_filter(&mut query, "path", self.path.as_deref());
        push_filter(&mut query, "port", self.port.map(|p| p.to_string()).as_deref());
        push_page(&mut query, self.page);
        query
    }
}

/// Request to delete a route by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRouteRequest {
    route_id: String,
    run_async: bool,
}

impl DeleteRouteRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> DeleteRouteRequestBuilder {
        DeleteRouteRequestBuilder::default()
    }

    /// The route identifier.
    #[must_use]
    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    /// Whether the deletion runs as a background job.
    #[must_use]
    pub const fn is_async(&self) -> bool {
        self.run_async
    }
}

/// Builder for [`DeleteRouteRequest`].
#[derive(Debug, Clone, Default)]
pub struct DeleteRouteRequestBuilder {
    route_id: Option<String>,
    run_async: bool,
}

impl DeleteRouteRequestBuilder {
    /// Sets the route identifier.
    #[must_use]
    pub fn route_id(mut self, id: impl Into<String>) -> Self {
        self.route_id = Some(id.into());
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
    /// Returns an error if the route id is missing.
    pub fn build(self) -> Result<DeleteRouteRequest, RequestError> {
        Ok(DeleteRouteRequest {
            route_id: require_text(self.route_id, "route id")?,
            run_async: self.run_async,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_query() {
        let request = ListRoutesRequest::new()
            .with_domain_id("test-domain-id")
            .with_host("test-host")
            .with_port(8080)
            .with_page(1);
        assert_eq!(
            request.query(),
            vec![
                ("q", String::from("domain_guid:test-domain-id")),
                ("q", String::from("host:test-host")),
                ("q", String::from("port:8080")),
                ("page", String::from("1")),
            ]
        );
    }

    #[test]
    fn test_delete_requires_route_id() {
        assert_eq!(
            DeleteRouteRequest::builder().build(),
            Err(RequestError::MissingField { field: "route id" })
        );
    }

    #[test]
    fn test_parse_route() {
        let json = r#"{
            "metadata": { "guid": "test-route-id" },
            "entity": { "host": "", "path": "", "port": 61001, "domain_guid": "test-domain-id" }
        }"#;
        let route: RouteResource = serde_json::from_str(json).expect("should parse");
        assert_eq!(route.entity.port, Some(61001));
        assert!(route.entity.host.is_empty());
    }
}
