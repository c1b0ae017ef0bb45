//! Operations façade.
//!
//! Composes several client calls into one user-facing action: binding a
//! service instance, listing the instances of a space, deleting a route or
//! terminating an application task. Names are resolved to identifiers
//! within the targeted space.

mod applications;
mod jobs;
mod lookup;
mod pager;
mod routes;
mod services;

use std::sync::Arc;
use std::time::Duration;

use crate::client::CloudFoundryClient;
use crate::error::{OperationError, Result};

pub use applications::{
    Applications, TerminateApplicationTaskRequest, TerminateApplicationTaskRequestBuilder,
};
pub use jobs::wait_for_completion;
pub use routes::{DeleteRouteRequest, DeleteRouteRequestBuilder, Routes};
pub use services::{
    BindServiceInstanceRequest, BindServiceInstanceRequestBuilder, ServiceInstance, Services,
    UnbindServiceInstanceRequest, UnbindServiceInstanceRequestBuilder,
};

/// Default interval between job polls in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default overall job timeout in seconds.
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 300;

/// How background jobs are polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Wait between two polls.
    pub interval: Duration,
    /// Give up once this much time has passed.
    pub timeout: Duration,
}

impl PollingConfig {
    /// Creates a polling configuration.
    #[must_use]
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        )
    }
}

/// State shared by the façades: the client, the target and the polling
/// policy.
#[derive(Debug)]
pub(crate) struct Context<C: ?Sized> {
    pub(crate) client: Arc<C>,
    pub(crate) space_id: Option<String>,
    pub(crate) polling: PollingConfig,
}

impl<C: ?Sized> Clone for Context<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            space_id: self.space_id.clone(),
            polling: self.polling,
        }
    }
}

impl<C: ?Sized> Context<C> {
    /// Returns the targeted space or fails before any call is made.
    pub(crate) fn space_id(&self) -> Result<&str> {
        self.space_id
            .as_deref()
            .ok_or_else(|| OperationError::NoTarget { target: "space" }.into())
    }
}

/// Entry point to the operations.
///
/// ```no_run
/// use std::sync::Arc;
/// use cf_operations::client::RestClient;
/// use cf_operations::operations::CloudFoundryOperations;
///
/// # async fn run() -> cf_operations::Result<()> {
/// let client = RestClient::builder("https://api.example.com")
///     .access_token("token")
///     .build()?;
/// let operations = CloudFoundryOperations::new(Arc::new(client)).with_space_id("space-id");
/// let instances = operations.services().list_instances().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CloudFoundryOperations<C: ?Sized> {
    context: Context<C>,
}

impl<C: ?Sized> Clone for CloudFoundryOperations<C> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<C: CloudFoundryClient + ?Sized> CloudFoundryOperations<C> {
    /// Creates operations over the given client with no target.
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            context: Context {
                client,
                space_id: None,
                polling: PollingConfig::default(),
            },
        }
    }

    /// Targets a space.
    #[must_use]
    pub fn with_space_id(mut self, space_id: impl Into<String>) -> Self {
        self.context.space_id = Some(space_id.into());
        self
    }

    /// Overrides the job polling policy.
    #[must_use]
    pub const fn with_polling(mut self, polling: PollingConfig) -> Self {
        self.context.polling = polling;
        self
    }

    /// The targeted space, if any.
    #[must_use]
    pub fn space_id(&self) -> Option<&str> {
        self.context.space_id.as_deref()
    }

    /// Service instance operations.
    #[must_use]
    pub fn services(&self) -> Services<C> {
        Services::new(self.context.clone())
    }

    /// Application operations.
    #[must_use]
    pub fn applications(&self) -> Applications<C> {
        Applications::new(self.context.clone())
    }

    /// Route operations.
    #[must_use]
    pub fn routes(&self) -> Routes<C> {
        Routes::new(self.context.clone())
    }
}
