//! Log cache read API.

mod read;

use async_trait::async_trait;

use crate::error::Result;

pub use read::{
    Counter, Envelope, EnvelopeBatch, EnvelopeType, Gauge, GaugeValue, Log, ReadRequest,
    ReadRequestBuilder, ReadResponse,
};

/// Client for the log cache.
#[async_trait]
pub trait LogCacheClient: Send + Sync {
    /// Reads envelopes of a single source.
    async fn read(&self, request: &ReadRequest) -> Result<ReadResponse>;
}
