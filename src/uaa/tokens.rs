//! Token grant requests and responses.

use serde::{Deserialize, Serialize};

use crate::client::validation::require_text;
use crate::error::RequestError;

/// Format of the issued access token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenFormat {
    /// Self-contained signed token.
    Jwt,
    /// Reference token resolved by the UAA.
    Opaque,
}

impl TokenFormat {
    /// The wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Jwt => "jwt",
            Self::Opaque => "opaque",
        }
    }
}

/// Tokens returned by a successful grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The access token.
    pub access_token: String,
    /// Token type, normally `bearer`.
    pub token_type: String,
    /// OpenID Connect identity token.
    #[serde(default)]
    pub id_token: Option<String>,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: u64,
    /// Space separated granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Token identifier.
    #[serde(default)]
    pub jti: Option<String>,
}

/// Request to exchange an authorization code for an OpenID identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTokenByOpenIdRequest {
    authorization_code: String,
    client_id: String,
    client_secret: String,
    redirect_uri: Option<String>,
    token_format: Option<TokenFormat>,
}

impl GetTokenByOpenIdRequest {
    /// Starts building the request.
    #[must_use]
    pub fn builder() -> GetTokenByOpenIdRequestBuilder {
        GetTokenByOpenIdRequestBuilder::default()
    }

    /// The client identifier.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub(crate) fn form(&self) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("grant_type", String::from("authorization_code")),
            ("response_type", String::from("id_token")),
            ("code", self.authorization_code.clone()),
        ];
        if let Some(uri) = &self.redirect_uri {
            form.push(("redirect_uri", uri.clone()));
        }
        if let Some(format) = self.token_format {
            form.push(("token_format", format.as_str().to_string()));
        }
        form
    }
}

/// Builder for [`GetTokenByOpenIdRequest`].
#[derive(Debug, Clone, Default)]
pub struct GetTokenByOpenIdRequestBuilder {
    authorization_code: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    token_format: Option<TokenFormat>,
}

impl GetTokenByOpenIdRequestBuilder {
    /// Sets the authorization code received from the login redirect.
    #[must_use]
    pub fn authorization_code(mut self, code: impl Into<String>) -> Self {
        self.authorization_code = Some(code.into());
        self
    }

    /// Sets the client identifier.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the client secret.
    #[must_use]
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Sets the redirect URI used during login.
    #[must_use]
    pub fn redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(uri.into());
        self
    }

    /// Sets the access token format.
    #[must_use]
    pub const fn token_format(mut self, format: TokenFormat) -> Self {
        self.token_format = Some(format);
        self
    }

    /// Validates and builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the code or client credentials are missing.
    pub fn build(self) -> Result<GetTokenByOpenIdRequest, RequestError> {
        Ok(GetTokenByOpenIdRequest {
            authorization_code: require_text(self.authorization_code, "authorization code")?,
            client_id: require_text(self.client_id, "client id")?,
            client_secret: require_text(self.client_secret, "client secret")?,
            redirect_uri: self.redirect_uri,
            token_format: self.token_format,
        })
    }
}
