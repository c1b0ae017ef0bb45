//! Cloud controller client.
//!
//! Request values live in [`v2`] and [`v3`]; [`CloudFoundryClient`] is the
//! typed interface and [`RestClient`] its HTTP implementation.

mod api;
mod http;
mod resource;
pub(crate) mod validation;

pub mod v2;
pub mod v3;

pub use api::CloudFoundryClient;
#[cfg(test)]
pub use api::MockCloudFoundryClient;
pub use http::{RestClient, RestClientBuilder, DEFAULT_TIMEOUT_SECS};
pub use resource::{
    Link, Metadata, Page, PageV3, Pagination, Relationship, Resource, ToOneRelationship,
};
