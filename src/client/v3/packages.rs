//! Package requests and resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::resource::ToOneRelationship;
use crate::client::validation::{require, require_text};
use crate::error::RequestError;

/// Relationships of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRelationships {
    /// The owning application.
    #[serde(rename = "app")]
    pub application: ToOneRelationship,
}

impl PackageRelationships {
    /// Creates relationships pointing at the given application.
    #[must_use]
    pub fn for_application(application_id: impl Into<String>) -> Self {
        Self {
            application: ToOneRelationship::to(application_id),
        }
    }
}

/// A package resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageResource {
    /// Package identifier.
    #[serde(rename = "guid")]
    pub id: String,
    /// Package type (`bits` or `docker`).
    #[serde(rename = "type")]
    pub package_type: String,
    /// Package state (`PROCESSING_UPLOAD`, `READY`, ...).
    pub state: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to copy the bits of one package into a new package of another
/// application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPackageRequest {
    source_package_id: String,
    relationships: PackageRelationships,
}

impl CopyPackageRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> CopyPackageRequestBuilder {
        CopyPackageRequestBuilder::default()
    }

    /// The package to copy from.
    #[must_use]
    pub fn source_package_id(&self) -> &str {
        &self.source_package_id
    }

    /// Relationships of the new package.
    #[must_use]
    pub const fn relationships(&self) -> &PackageRelationships {
        &self.relationships
    }

    pub(crate) fn body(&self) -> serde_json::Value {
        serde_json::json!({ "relationships": self.relationships })
    }
}

/// Builder for [`CopyPackageRequest`].
#[derive(Debug, Clone, Default)]
pub struct CopyPackageRequestBuilder {
    source_package_id: Option<String>,
    relationships: Option<PackageRelationships>,
}

impl CopyPackageRequestBuilder {
    /// Sets the source package.
    #[must_use]
    pub fn source_package_id(mut self, id: impl Into<String>) -> Self {
        self.source_package_id = Some(id.into());
        self
    }

    /// Sets the relationships of the new package.
    #[must_use]
    pub fn relationships(mut self, relationships: PackageRelationships) -> Self {
        self.relationships = Some(relationships);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the source package or relationships are missing.
    pub fn build(self) -> Result<CopyPackageRequest, RequestError> {
        let relationships = require(self.relationships, "relationships")?;
        if relationships.application.data.is_none() {
            return Err(RequestError::missing("application relationship"));
        }

        Ok(CopyPackageRequest {
            source_package_id: require_text(self.source_package_id, "source package id")?,
            relationships,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_relationships() {
        let result = CopyPackageRequest::builder()
            .source_package_id("test-source-package-id")
            .build();
        assert_eq!(result, Err(RequestError::MissingField { field: "relationships" }));
    }

    #[test]
    fn test_no_source_package_id() {
        let result = CopyPackageRequest::builder()
            .relationships(PackageRelationships::for_application("test-id"))
            .build();
        assert_eq!(
            result,
            Err(RequestError::MissingField { field: "source package id" })
        );
    }

    #[test]
    fn test_empty_application_relationship() {
        let result = CopyPackageRequest::builder()
            .relationships(PackageRelationships::default())
            .source_package_id("test-source-package-id")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_valid() {
        let request = CopyPackageRequest::builder()
            .relationships(PackageRelationships::for_application("test-id"))
            .source_package_id("test-source-package-id")
            .build()
            .expect("request should be valid");
        assert_eq!(
            request.body(),
            serde_json::json!({ "relationships": { "app": { "data": { "guid": "test-id" } } } })
        );
    }
}
