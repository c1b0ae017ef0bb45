//! UAA token API.

mod tokens;

use async_trait::async_trait;

use crate::error::Result;

pub use tokens::{
    GetTokenByOpenIdRequest, GetTokenByOpenIdRequestBuilder, TokenFormat, TokenResponse,
};

/// Client for the UAA token endpoints.
#[async_trait]
pub trait UaaClient: Send + Sync {
    /// Exchanges an authorization code for an OpenID identity token.
    async fn get_token_by_open_id(&self, request: &GetTokenByOpenIdRequest)
        -> Result<TokenResponse>;
}
