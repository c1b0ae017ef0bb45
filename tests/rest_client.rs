//! HTTP-level tests of the REST client against a mock platform.

use cf_operations::client::v2::{
    DeleteRouteRequest, GetFeatureFlagRequest, GetJobRequest, JobStatus,
    ListSpaceApplicationsRequest,
};
use cf_operations::client::{CloudFoundryClient, RestClient};
use cf_operations::error::{CfError, ClientError};
use cf_operations::logcache::{EnvelopeType, LogCacheClient, ReadRequest};
use cf_operations::uaa::{GetTokenByOpenIdRequest, TokenFormat, UaaClient};
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{basic_auth, bearer_token, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RestClient {
    RestClient::builder(server.uri())
        .uaa_url(server.uri())
        .log_cache_url(server.uri())
        .access_token("test-access-token")
        .build()
        .expect("client builds")
}

#[tokio::test]
async fn test_list_space_applications_sends_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/spaces/test-space-id/apps"))
        .and(query_param("q", "name:test-application-name"))
        .and(query_param("page", "1"))
        .and(bearer_token("test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_results": 1,
            "total_pages": 1,
            "resources": [{
                "metadata": { "guid": "test-application-id" },
                "entity": { "name": "test-application-name", "state": "STARTED" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ListSpaceApplicationsRequest::builder()
        .space_id("test-space-id")
        .name("test-application-name")
        .page(1)
        .build()
        .expect("request is valid");

    let page = client(&server)
        .list_space_applications(&request)
        .await
        .expect("list succeeds");

    assert_eq!(page.total_pages, 1);
    assert_eq!(page.resources[0].id(), "test-application-id");
    assert_eq!(page.resources[0].entity.state.as_deref(), Some("STARTED"));
}

#[tokio::test]
async fn test_v2_error_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/config/feature_flags/test_feature_flag_name"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 330000,
            "description": "The feature flag could not be found: test_feature_flag_name",
            "error_code": "CF-FeatureFlagNotFound"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GetFeatureFlagRequest::new("test_feature_flag_name").expect("valid name");
    let err = client(&server)
        .get_feature_flag(&request)
        .await
        .expect_err("flag is missing");

    assert!(matches!(err, CfError::CloudFoundry(_)));
    assert_eq!(
        err.to_string(),
        "CF-FeatureFlagNotFound(330000): The feature flag could not be found: test_feature_flag_name"
    );
}

#[tokio::test]
async fn test_unauthorized_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/test-job-id"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let request = GetJobRequest::new("test-job-id").expect("valid id");
    let err = client(&server)
        .get_job(&request)
        .await
        .expect_err("token is rejected");

    assert!(matches!(
        err,
        CfError::Client(ClientError::AuthenticationFailed { .. })
    ));
}

#[tokio::test]
async fn test_delete_route_with_and_without_job() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/routes/test-async-route-id"))
        .and(query_param("async", "true"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "metadata": { "guid": "test-job-id" },
            "entity": { "guid": "test-job-id", "status": "queued" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/routes/test-sync-route-id"))
        .and(query_param("async", "false"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client(&server);

    let async_request = DeleteRouteRequest::builder()
        .route_id("test-async-route-id")
        .run_async(true)
        .build()
        .expect("request is valid");
    let job = client
        .delete_route(&async_request)
        .await
        .expect("delete succeeds")
        .expect("async delete returns a job");
    assert_eq!(job.id(), "test-job-id");
    assert_eq!(job.entity.status, JobStatus::Queued);

    let sync_request = DeleteRouteRequest::builder()
        .route_id("test-sync-route-id")
        .run_async(false)
        .build()
        .expect("request is valid");
    let job = client
        .delete_route(&sync_request)
        .await
        .expect("delete succeeds");
    assert!(job.is_none());
}

#[tokio::test]
async fn test_get_token_by_open_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(basic_auth("test-client-id", "test-client-secret"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=test-authorization-code"))
        .and(body_string_contains("token_format=opaque"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-access-token",
            "token_type": "bearer",
            "id_token": "test-id-token",
            "expires_in": 43199,
            "jti": "test-jti"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GetTokenByOpenIdRequest::builder()
        .authorization_code("test-authorization-code")
        .client_id("test-client-id")
        .client_secret("test-client-secret")
        .token_format(TokenFormat::Opaque)
        .build()
        .expect("request is valid");

    let token = client(&server)
        .get_token_by_open_id(&request)
        .await
        .expect("grant succeeds");

    assert_eq!(token.id_token.as_deref(), Some("test-id-token"));
    assert_eq!(token.expires_in, 43199);
}

#[tokio::test]
async fn test_uaa_error_is_mapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid authorization code: test-authorization-code"
        })))
        .mount(&server)
        .await;

    let request = GetTokenByOpenIdRequest::builder()
        .authorization_code("test-authorization-code")
        .client_id("test-client-id")
        .client_secret("test-client-secret")
        .build()
        .expect("request is valid");

    let err = client(&server)
        .get_token_by_open_id(&request)
        .await
        .expect_err("grant is rejected");

    assert!(matches!(err, CfError::Uaa(_)));
    assert_eq!(
        err.to_string(),
        "invalid_grant: Invalid authorization code: test-authorization-code"
    );
}

#[tokio::test]
async fn test_log_cache_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/read/test-source-id"))
        .and(query_param("limit", "10"))
        .and(query_param("envelope_types", "LOG"))
        .and(bearer_token("test-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "envelopes": {
                "batch": [{
                    "timestamp": "1544566010000000000",
                    "source_id": "test-source-id",
                    "instance_id": "0",
                    "log": { "payload": "aGVsbG8gd29ybGQ=", "type": "OUT" }
                }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ReadRequest::builder()
        .source_id("test-source-id")
        .limit(10)
        .envelope_type(EnvelopeType::Log)
        .build()
        .expect("request is valid");

    let response = client(&server).read(&request).await.expect("read succeeds");

    let envelope = &response.envelopes.batch[0];
    assert_eq!(envelope.timestamp, 1_544_566_010_000_000_000);
    let log = envelope.log.as_ref().expect("log envelope");
    assert_eq!(log.payload_text().expect("valid payload"), "hello world");
}

#[tokio::test]
async fn test_missing_log_cache_endpoint() {
    let client = RestClient::builder("https://api.example.com")
        .build()
        .expect("client builds");
    let request = ReadRequest::builder()
        .source_id("test-source-id")
        .build()
        .expect("request is valid");

    let err = client.read(&request).await.expect_err("no endpoint");
    assert_eq!(err.to_string(), "Client error: no log cache endpoint configured");
}

#[tokio::test]
async fn test_rate_limit_waits_for_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/test-job-id"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/jobs/test-job-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": { "guid": "test-job-id" },
            "entity": { "guid": "test-job-id", "status": "finished" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GetJobRequest::new("test-job-id").expect("valid id");
    let started = Instant::now();
    let job = client(&server).get_job(&request).await.expect("retry succeeds");

    assert_eq!(job.entity.status, JobStatus::Finished);
    assert!(started.elapsed() >= Duration::from_secs(2));
}
