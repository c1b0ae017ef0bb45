//! Resource envelopes shared by the cloud controller APIs.
//!
//! v2 resources wrap an entity in `{metadata, entity}` and are listed in
//! pages carrying `total_pages`. v3 resources are flat and are listed with
//! a `pagination` block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata attached to every v2 resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Opaque resource identifier.
    #[serde(rename = "guid")]
    pub id: String,
    /// Resource URL relative to the API root.
    #[serde(default)]
    pub url: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A v2 resource: metadata plus a typed entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    /// Resource metadata.
    pub metadata: Metadata,
    /// Resource entity.
    pub entity: E,
}

impl<E> Resource<E> {
    /// Returns the resource identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}

/// A page of v2 resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<R> {
    /// Total results across all pages.
    #[serde(default)]
    pub total_results: u32,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// URL of the previous page.
    #[serde(default)]
    pub prev_url: Option<String>,
    /// URL of the next page.
    #[serde(default)]
    pub next_url: Option<String>,
    /// Resources on this page.
    #[serde(default = "Vec::new")]
    pub resources: Vec<R>,
}

impl<R> Default for Page<R> {
    fn default() -> Self {
        Self {
            total_results: 0,
            total_pages: 0,
            prev_url: None,
            next_url: None,
            resources: Vec::new(),
        }
    }
}

impl<R> Page<R> {
    /// Creates a single page holding the given resources.
    #[must_use]
    pub fn single(resources: Vec<R>) -> Self {
        Self {
            total_results: u32::try_from(resources.len()).unwrap_or(u32::MAX),
            total_pages: 1,
            prev_url: None,
            next_url: None,
            resources,
        }
    }
}

/// Link to another page in a v3 listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL.
    pub href: String,
}

/// Pagination block of a v3 listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Total results across all pages.
    #[serde(default)]
    pub total_results: u32,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// First page.
    #[serde(default)]
    pub first: Option<Link>,
    /// Last page.
    #[serde(default)]
    pub last: Option<Link>,
    /// Next page.
    #[serde(default)]
    pub next: Option<Link>,
    /// Previous page.
    #[serde(default)]
    pub previous: Option<Link>,
}

/// A page of v3 resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageV3<R> {
    /// Pagination details.
    #[serde(default)]
    pub pagination: Pagination,
    /// Resources on this page.
    #[serde(default = "Vec::new")]
    pub resources: Vec<R>,
}

/// A reference to another v3 resource by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Identifier of the related resource.
    #[serde(rename = "guid")]
    pub id: String,
}

impl Relationship {
    /// Creates a relationship to the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A to-one relationship; `data` is null when nothing is related.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToOneRelationship {
    /// The related resource, if any.
    pub data: Option<Relationship>,
}

impl ToOneRelationship {
    /// Creates a to-one relationship pointing at the given identifier.
    #[must_use]
    pub fn to(id: impl Into<String>) -> Self {
        Self {
            data: Some(Relationship::new(id)),
        }
    }
}

/// Query parameters of a list request.
pub(crate) type Query = Vec<(&'static str, String)>;

/// Appends a v2 `q=<field>:<value>` filter when the value is present.
pub(crate) fn push_filter(query: &mut Query, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        query.push(("q", format!("{field}:{value}")));
    }
}

/// Appends the page parameter when present.
pub(crate) fn push_page(query: &mut Query, page: Option<u32>) {
    if let Some(page) = page {
        query.push(("page", page.to_string()));
    }
}
