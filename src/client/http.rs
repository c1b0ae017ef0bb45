//! HTTP implementation of the platform clients.
//!
//! One [`RestClient`] talks to the cloud controller, the UAA and the log
//! cache. Transient failures (network errors, rate limiting) are retried
//! with a linear backoff; platform errors are surfaced verbatim.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Method, Request, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, trace};

use crate::client::api::CloudFoundryClient;
use crate::client::resource::{Page, PageV3, Query, ToOneRelationship};
use crate::client::v2::{
    ApplicationResource, BuildpackResource, CreateServiceBindingRequest, DeleteRouteRequest,
    DeleteServiceBindingRequest, DomainResource, FeatureFlag, GetApplicationRequest,
    GetFeatureFlagRequest, GetJobRequest, GetServicePlanRequest, GetServiceRequest, JobResource,
    ListApplicationServiceBindingsRequest, ListDomainsRequest, ListRoutesRequest,
    ListServiceBindingsRequest, ListSpaceApplicationsRequest, ListSpaceServiceInstancesRequest,
    RouteResource, ServiceBindingResource, ServiceInstanceResource, ServicePlanResource,
    ServiceResource, UploadApplicationRequest, UploadBuildpackRequest,
};
use crate::client::v3::{
    AssignSpaceIsolationSegmentRequest, CancelTaskRequest, CopyPackageRequest,
    ListApplicationTasksRequest, PackageResource, TaskResource,
};
use crate::error::{CfError, ClientError, CloudFoundryError, ConfigError, Result, UaaError};
use crate::logcache::{LogCacheClient, ReadRequest, ReadResponse};
use crate::uaa::{GetTokenByOpenIdRequest, TokenResponse, UaaClient};

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Fallback wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Longest wait honoured between two attempts.
const MAX_RETRY_DELAY_SECS: u64 = 60;

/// v2 error body.
#[derive(Debug, Deserialize)]
struct V2ErrorBody {
    code: u32,
    description: String,
    error_code: String,
}

/// v3 error body.
#[derive(Debug, Deserialize)]
struct V3ErrorBody {
    errors: Vec<V3Error>,
}

#[derive(Debug, Deserialize)]
struct V3Error {
    code: u32,
    #[serde(default)]
    title: String,
    #[serde(default)]
    detail: String,
}

/// UAA error body.
#[derive(Debug, Deserialize)]
struct UaaErrorBody {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// HTTP client for the cloud controller, UAA and log cache.
#[derive(Debug, Clone)]
pub struct RestClient {
    /// HTTP client.
    client: Client,
    /// Cloud controller root.
    api_url: Url,
    /// UAA root.
    uaa_url: Option<Url>,
    /// Log cache root.
    log_cache_url: Option<Url>,
    /// Bearer token for the cloud controller and log cache.
    access_token: Option<String>,
}

/// Builder for [`RestClient`].
#[derive(Debug, Clone)]
pub struct RestClientBuilder {
    api_url: String,
    uaa_url: Option<String>,
    log_cache_url: Option<String>,
    access_token: Option<String>,
    timeout_secs: u64,
    skip_ssl_validation: bool,
}

impl RestClientBuilder {
    /// Sets the UAA root URL.
    #[must_use]
    pub fn uaa_url(mut self, url: impl Into<String>) -> Self {
        self.uaa_url = Some(url.into());
        self
    }

    /// Sets the log cache root URL.
    #[must_use]
    pub fn log_cache_url(mut self, url: impl Into<String>) -> Self {
        self.log_cache_url = Some(url.into());
        self
    }

    /// Sets the bearer token sent to the cloud controller and log cache.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Accepts invalid TLS certificates.
    #[must_use]
    pub const fn skip_ssl_validation(mut self, skip: bool) -> Self {
        self.skip_ssl_validation = skip;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL does not parse or the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<RestClient> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .danger_accept_invalid_certs(self.skip_ssl_validation)
            .build()
            .map_err(|e| ClientError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(RestClient {
            client,
            api_url: parse_url(&self.api_url, "api.url")?,
            uaa_url: self
                .uaa_url
                .as_deref()
                .map(|url| parse_url(url, "api.uaa_url"))
                .transpose()?,
            log_cache_url: self
                .log_cache_url
                .as_deref()
                .map(|url| parse_url(url, "api.log_cache_url"))
                .transpose()?,
            access_token: self.access_token,
        })
    }
}

fn parse_url(url: &str, field: &str) -> Result<Url> {
    Url::parse(url)
        .map_err(|e| ConfigError::validation(format!("invalid URL '{url}': {e}"), field).into())
}

/// Maps an error response body to the most specific error it describes.
fn error_from_body(status: StatusCode, body: &str) -> CfError {
    if let Ok(error) = serde_json::from_str::<V2ErrorBody>(body) {
        return CloudFoundryError {
            code: error.code,
            error_code: error.error_code,
            description: error.description,
        }
        .into();
    }

    if let Ok(body) = serde_json::from_str::<V3ErrorBody>(body) {
        if let Some(error) = body.errors.into_iter().next() {
            return CloudFoundryError {
                code: error.code,
                error_code: error.title,
                description: error.detail,
            }
            .into();
        }
    }

    if let Ok(error) = serde_json::from_str::<UaaErrorBody>(body) {
        return UaaError {
            error: error.error,
            description: error.error_description,
        }
        .into();
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ClientError::AuthenticationFailed {
            message: if body.is_empty() {
                String::from("Invalid access token")
            } else {
                body.to_string()
            },
        }
        .into();
    }

    ClientError::api_error(status.as_u16(), body).into()
}

/// Reads a JSON body.
async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response.json().await.map_err(|e| {
        ClientError::invalid_response(format!("Failed to parse response: {e}")).into()
    })
}

/// Reads an optional job body: `202` carries a job, `204` nothing.
async fn parse_optional_job(response: Response) -> Result<Option<JobResource>> {
    if response.status() == StatusCode::NO_CONTENT {
        return Ok(None);
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClientError::network(format!("Failed to read response: {e}")))?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| ClientError::invalid_response(format!("Failed to parse job: {e}")).into())
}

/// Reads a file into a multipart part.
async fn file_part(path: &Path, file_name: String, mime: &str) -> Result<Part> {
    let bytes = tokio::fs::read(path).await?;
    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| ClientError::invalid_response(format!("Invalid content type: {e}")).into())
}

/// Wait before the given attempt: the server's `Retry-After` when it asked
/// for one, never less than the linear backoff, capped at
/// [`MAX_RETRY_DELAY_SECS`].
fn retry_delay(error: &CfError, attempt: u32) -> Duration {
    let backoff = Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt));
    let requested = error
        .retry_delay_secs()
        .map_or(Duration::ZERO, |secs| Duration::from_secs(secs.min(MAX_RETRY_DELAY_SECS)));
    backoff.max(requested)
}

fn async_query(run_async: bool) -> Query {
    vec![("async", run_async.to_string())]
}

impl RestClient {
    /// Starts building a client for the given cloud controller root.
    #[must_use]
    pub fn builder(api_url: impl Into<String>) -> RestClientBuilder {
        RestClientBuilder {
            api_url: api_url.into(),
            uaa_url: None,
            log_cache_url: None,
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            skip_ssl_validation: false,
        }
    }

    /// The cloud controller root.
    #[must_use]
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn endpoint(root: &Url, path: &str) -> String {
        format!("{}{path}", root.as_str().trim_end_matches('/'))
    }

    /// Starts an authenticated cloud controller request.
    fn api(&self, method: Method, path: &str) -> RequestBuilder {
        let url = Self::endpoint(&self.api_url, path);
        trace!("{method} {url}");
        self.authenticated(self.client.request(method, url))
    }

    fn authenticated(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header(header::ACCEPT, "application/json");
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request, retrying transient failures.
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|e| ClientError::network(format!("Failed to build request: {e}")))?;

        let mut last_error: Option<CfError> = None;

        for attempt in 0..MAX_RETRIES {
            if let Some(error) = &last_error {
                let delay = retry_delay(error, attempt);
                debug!("Retry attempt {attempt} of {MAX_RETRIES} in {delay:?}");
                tokio::time::sleep(delay).await;
            }

            // Streaming bodies cannot be replayed and get a single attempt.
            let Some(attempt_request) = request.try_clone() else {
                return self.execute_once(request).await;
            };

            match self.execute_once(attempt_request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ClientError::network("Max retries exceeded").into()))
    }

    /// Sends a single request and maps error statuses.
    async fn execute_once(&self, request: Request) -> Result<Response> {
        debug!("{} {}", request.method(), request.url().path());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ClientError::network(format!("Request failed: {e}")))?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            return Err(ClientError::RateLimited {
                retry_after_secs: retry_after,
            }
            .into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status, &body));
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let response = self.execute(self.api(Method::GET, path).query(query)).await?;
        parse_json(response).await
    }
}

#[async_trait]
impl CloudFoundryClient for RestClient {
    async fn get_application(
        &self,
        request: &GetApplicationRequest,
    ) -> Result<ApplicationResource> {
        let path = format!("/v2/apps/{}", request.application_id());
        self.get_json(&path, &Query::new()).await
    }

    async fn list_application_service_bindings(
        &self,
        request: &ListApplicationServiceBindingsRequest,
    ) -> Result<Page<ServiceBindingResource>> {
        let path = format!("/v2/apps/{}/service_bindings", request.application_id());
        self.get_json(&path, &request.query()).await
    }

    async fn upload_application(
        &self,
        request: &UploadApplicationRequest,
    ) -> Result<JobResource> {
        let part = file_part(
            request.application(),
            String::from("application.zip"),
            "application/zip",
        )
        .await?;
        let form = Form::new().text("resources", "[]").part("application", part);

        let path = format!("/v2/apps/{}/bits", request.application_id());
        let builder = self
            .api(Method::PUT, &path)
            .query(&async_query(request.is_async()))
            .multipart(form);
        parse_json(self.execute(builder).await?).await
    }

    async fn upload_buildpack(
        &self,
        request: &UploadBuildpackRequest,
    ) -> Result<BuildpackResource> {
        let part = file_part(
            request.buildpack(),
            request.filename().to_string(),
            "application/zip",
        )
        .await?;
        let form = Form::new().part("buildpack", part);

        let path = format!("/v2/buildpacks/{}/bits", request.buildpack_id());
        let builder = self.api(Method::PUT, &path).multipart(form);
        parse_json(self.execute(builder).await?).await
    }

    async fn get_feature_flag(&self, request: &GetFeatureFlagRequest) -> Result<FeatureFlag> {
        let path = format!("/v2/config/feature_flags/{}", request.name());
        self.get_json(&path, &Query::new()).await
    }

    async fn get_job(&self, request: &GetJobRequest) -> Result<JobResource> {
        let path = format!("/v2/jobs/{}", request.job_id());
        self.get_json(&path, &Query::new()).await
    }

    async fn create_service_binding(
        &self,
        request: &CreateServiceBindingRequest,
    ) -> Result<ServiceBindingResource> {
        let builder = self
            .api(Method::POST, "/v2/service_bindings")
            .json(&request.body());
        parse_json(self.execute(builder).await?).await
    }

    async fn delete_service_binding(
        &self,
        request: &DeleteServiceBindingRequest,
    ) -> Result<Option<JobResource>> {
        let path = format!("/v2/service_bindings/{}", request.service_binding_id());
        let builder = self
            .api(Method::DELETE, &path)
            .query(&async_query(request.is_async()));
        parse_optional_job(self.execute(builder).await?).await
    }

    async fn list_service_bindings(
        &self,
        request: &ListServiceBindingsRequest,
    ) -> Result<Page<ServiceBindingResource>> {
        self.get_json("/v2/service_bindings", &request.query()).await
    }

    async fn get_service_plan(
        &self,
        request: &GetServicePlanRequest,
    ) -> Result<ServicePlanResource> {
        let path = format!("/v2/service_plans/{}", request.service_plan_id());
        self.get_json(&path, &Query::new()).await
    }

    async fn get_service(&self, request: &GetServiceRequest) -> Result<ServiceResource> {
        let path = format!("/v2/services/{}", request.service_id());
        self.get_json(&path, &Query::new()).await
    }

    async fn list_space_applications(
        &self,
        request: &ListSpaceApplicationsRequest,
    ) -> Result<Page<ApplicationResource>> {
        let path = format!("/v2/spaces/{}/apps", request.space_id());
        self.get_json(&path, &request.query()).await
    }

    async fn list_space_service_instances(
        &self,
        request: &ListSpaceServiceInstancesRequest,
    ) -> Result<Page<ServiceInstanceResource>> {
        let path = format!("/v2/spaces/{}/service_instances", request.space_id());
        self.get_json(&path, &request.query()).await
    }

    async fn list_private_domains(
        &self,
        request: &ListDomainsRequest,
    ) -> Result<Page<DomainResource>> {
        self.get_json("/v2/private_domains", &request.query()).await
    }

    async fn list_shared_domains(
        &self,
        request: &ListDomainsRequest,
    ) -> Result<Page<DomainResource>> {
        self.get_json("/v2/shared_domains", &request.query()).await
    }

    async fn list_routes(&self, request: &ListRoutesRequest) -> Result<Page<RouteResource>> {
        self.get_json("/v2/routes", &request.query()).await
    }

    async fn delete_route(&self, request: &DeleteRouteRequest) -> Result<Option<JobResource>> {
        let path = format!("/v2/routes/{}", request.route_id());
        let builder = self
            .api(Method::DELETE, &path)
            .query(&async_query(request.is_async()));
        parse_optional_job(self.execute(builder).await?).await
    }

    async fn copy_package(&self, request: &CopyPackageRequest) -> Result<PackageResource> {
        let builder = self
            .api(Method::POST, "/v3/packages")
            .query(&[("source_guid", request.source_package_id())])
            .json(&request.body());
        parse_json(self.execute(builder).await?).await
    }

    async fn assign_space_isolation_segment(
        &self,
        request: &AssignSpaceIsolationSegmentRequest,
    ) -> Result<ToOneRelationship> {
        let path = format!(
            "/v3/spaces/{}/relationships/isolation_segment",
            request.space_id()
        );
        let builder = self.api(Method::PATCH, &path).json(&request.body());
        parse_json(self.execute(builder).await?).await
    }

    async fn list_application_tasks(
        &self,
        request: &ListApplicationTasksRequest,
    ) -> Result<PageV3<TaskResource>> {
        let path = format!("/v3/apps/{}/tasks", request.application_id());
        self.get_json(&path, &request.query()).await
    }

    async fn cancel_task(&self, request: &CancelTaskRequest) -> Result<TaskResource> {
        let path = format!("/v3/tasks/{}/actions/cancel", request.task_id());
        parse_json(self.execute(self.api(Method::POST, &path)).await?).await
    }
}

#[async_trait]
impl UaaClient for RestClient {
    async fn get_token_by_open_id(
        &self,
        request: &GetTokenByOpenIdRequest,
    ) -> Result<TokenResponse> {
        let root = self
            .uaa_url
            .as_ref()
            .ok_or(ClientError::MissingEndpoint { endpoint: "uaa" })?;
        let url = Self::endpoint(root, "/oauth/token");
        trace!("POST {url}");

        let builder = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json")
            .basic_auth(request.client_id(), Some(request.client_secret()))
            .form(&request.form());
        parse_json(self.execute(builder).await?).await
    }
}

#[async_trait]
impl LogCacheClient for RestClient {
    async fn read(&self, request: &ReadRequest) -> Result<ReadResponse> {
        let root = self
            .log_cache_url
            .as_ref()
            .ok_or(ClientError::MissingEndpoint {
                endpoint: "log cache",
            })?;
        let url = Self::endpoint(root, &format!("/api/v1/read/{}", request.source_id()));
        trace!("GET {url}");

        let builder = self
            .authenticated(self.client.get(url))
            .query(&request.query());
        parse_json(self.execute(builder).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_error_body() {
        let body = r#"{"code": 10003, "description": "You are not authorized", "error_code": "CF-NotAuthorized"}"#;
        let err = error_from_body(StatusCode::FORBIDDEN, body);
        assert_eq!(
            err.to_string(),
            "CF-NotAuthorized(10003): You are not authorized"
        );
    }

    #[test]
    fn test_v3_error_body() {
        let body = r#"{"errors": [{"code": 10010, "title": "CF-ResourceNotFound", "detail": "Task not found"}]}"#;
        let err = error_from_body(StatusCode::NOT_FOUND, body);
        assert!(matches!(
            err,
            CfError::CloudFoundry(CloudFoundryError { code: 10010, .. })
        ));
    }

    #[test]
    fn test_uaa_error_body() {
        let body = r#"{"error": "invalid_grant", "error_description": "Invalid authorization code"}"#;
        let err = error_from_body(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "invalid_grant: Invalid authorization code");
    }

    #[test]
    fn test_plain_error_body() {
        assert!(matches!(
            error_from_body(StatusCode::UNAUTHORIZED, ""),
            CfError::Client(ClientError::AuthenticationFailed { .. })
        ));
        assert!(matches!(
            error_from_body(StatusCode::BAD_GATEWAY, "upstream down"),
            CfError::Client(ClientError::ApiRequestFailed { status: 502, .. })
        ));
    }

    #[test]
    fn test_builder_rejects_bad_url() {
        assert!(matches!(
            RestClient::builder("not a url").build(),
            Err(CfError::Config(ConfigError::ValidationError { .. }))
        ));
    }

    #[test]
    fn test_endpoint_join() {
        let root = Url::parse("https://api.example.com/").expect("valid url");
        assert_eq!(
            RestClient::endpoint(&root, "/v2/jobs/1"),
            "https://api.example.com/v2/jobs/1"
        );
    }

    #[test]
    fn test_retry_delay_honours_retry_after() {
        let limited = CfError::from(ClientError::RateLimited { retry_after_secs: 3 });
        assert_eq!(retry_delay(&limited, 1), Duration::from_secs(3));

        let capped = CfError::from(ClientError::RateLimited { retry_after_secs: 3600 });
        assert_eq!(retry_delay(&capped, 1), Duration::from_secs(MAX_RETRY_DELAY_SECS));

        let network = CfError::from(ClientError::network("reset"));
        assert_eq!(retry_delay(&network, 2), Duration::from_millis(2 * RETRY_DELAY_MS));
    }
}
