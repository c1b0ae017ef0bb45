//! Space-scoped listing requests.

use crate::client::resource::{push_filter, push_page, Query};
use crate::client::validation::require_text;
use crate::error::RequestError;

/// Request to list the applications of a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpaceApplicationsRequest {
    space_id: String,
    name: Option<String>,
    diego: Option<bool>,
    page: Option<u32>,
}

impl ListSpaceApplicationsRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> ListSpaceApplicationsRequestBuilder {
        ListSpaceApplicationsRequestBuilder::default()
    }

    /// The space identifier.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// Optional name filter.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_filter(&mut query, "name", self.name());
        if let Some(diego) = self.diego {
            query.push(("diego", diego.to_string()));
        }
        push_page(&mut query, self.page);
        query
    }
}

/// Builder for [`ListSpaceApplicationsRequest`].
#[derive(Debug, Clone, Default)]
pub struct ListSpaceApplicationsRequestBuilder {
    space_id: Option<String>,
    name: Option<String>,
    diego: Option<bool>,
    page: Option<u32>,
}

impl ListSpaceApplicationsRequestBuilder {
    /// Sets the space identifier.
    #[must_use]
    pub fn space_id(mut self, id: impl Into<String>) -> Self {
        self.space_id = Some(id.into());
        self
    }

    /// Filters by application name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters by runtime backend.
    #[must_use]
    pub const fn diego(mut self, diego: bool) -> Self {
        self.diego = Some(diego);
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
    /// Returns an error if the space id is missing.
    pub fn build(self) -> Result<ListSpaceApplicationsRequest, RequestError> {
        Ok(ListSpaceApplicationsRequest {
            space_id: require_text(self.space_id, "space id")?,
            name: self.name,
            diego: self.diego,
            page: self.page,
        })
    }
}

/// Request to list the service instances of a space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSpaceServiceInstancesRequest {
    space_id: String,
    name: Option<String>,
    return_user_provided_service_instances: bool,
    page: Option<u32>,
}

impl ListSpaceServiceInstancesRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> ListSpaceServiceInstancesRequestBuilder {
        ListSpaceServiceInstancesRequestBuilder::default()
    }

    /// The space identifier.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// Optional name filter.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether user-provided instances are included.
    #[must_use]
    pub const fn includes_user_provided(&self) -> bool {
        self.return_user_provided_service_instances
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> Option<u32> {
        self.page
    }

    pub(crate) fn query(&self) -> Query {
        let mut query = Query::new();
        push_filter(&mut query, "name", self.name());
        if self.return_user_provided_service_instances {
            query.push(("return_user_provided_service_instances", String::from("true")));
        }
        push_page(&mut query, self.page);
        query
    }
}

/// Builder for [`ListSpaceServiceInstancesRequest`].
#[derive(Debug, Clone, Default)]
pub struct ListSpaceServiceInstancesRequestBuilder {
    space_id: Option<String>,
    name: Option<String>,
    return_user_provided_service_instances: bool,
    page: Option<u32>,
}

impl ListSpaceServiceInstancesRequestBuilder {
    /// Sets the space identifier.
    #[must_use]
    pub fn space_id(mut self, id: impl Into<String>) -> Self {
        self.space_id = Some(id.into());
        self
    }

    /// Filters by instance name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Includes user-provided instances in the listing.
    #[must_use]
    pub const fn return_user_provided_service_instances(mut self, include: bool) -> Self {
        self.return_user_provided_service_instances = include;
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
    /// Returns an error if the space id is missing.
    pub fn build(self) -> Result<ListSpaceServiceInstancesRequest, RequestError> {
        Ok(ListSpaceServiceInstancesRequest {
            space_id: require_text(self.space_id, "space id")?,
            name: self.name,
            return_user_provided_service_instances: self.return_user_provided_service_instances,
            page: self.page,
        })
    }
}
