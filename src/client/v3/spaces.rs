//! Space isolation segment assignment.

use crate::client::resource::{Relationship, ToOneRelationship};
use crate::client::validation::require_text;
use crate::error::RequestError;

/// Request to assign an isolation segment to a space. Omitting the
/// relationship unassigns the current segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignSpaceIsolationSegmentRequest {
    space_id: String,
    data: Option<Relationship>,
}

impl AssignSpaceIsolationSegmentRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> AssignSpaceIsolationSegmentRequestBuilder {
        AssignSpaceIsolationSegmentRequestBuilder::default()
    }

    /// The space identifier.
    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    /// The isolation segment to assign, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&Relationship> {
        self.data.as_ref()
    }

    pub(crate) fn body(&self) -> ToOneRelationship {
        ToOneRelationship {
            data: self.data.clone(),
        }
    }
}

/// Builder for [`AssignSpaceIsolationSegmentRequest`].
#[derive(Debug, Clone, Default)]
pub struct AssignSpaceIsolationSegmentRequestBuilder {
    space_id: Option<String>,
    data: Option<Relationship>,
}

impl AssignSpaceIsolationSegmentRequestBuilder {
    /// Sets the space identifier.
    #[must_use]
    pub fn space_id(mut self, id: impl Into<String>) -> Self {
        self.space_id = Some(id.into());
        self
    }

    /// Sets the isolation segment to assign.
    #[must_use]
    pub fn data(mut self, data: Relationship) -> Self {
        self.data = Some(data);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the space id is missing.
    pub fn build(self) -> Result<AssignSpaceIsolationSegmentRequest, RequestError> {
        Ok(AssignSpaceIsolationSegmentRequest {
            space_id: require_text(self.space_id, "space id")?,
            data: self.data,
        })
    }
}
