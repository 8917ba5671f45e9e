//! Invoker retry and transport configuration over HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::common::{client_with, retrieve_response};
use fuel_sdk::{ClientCredentials, RetryConfig, SoapClient, SoapConfig};
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_timeout_is_retried_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(retrieve_response("OK", "slow", ""))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(retrieve_response("OK", "fast", "")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_with(&server, RetryConfig::once(), Duration::from_millis(300));
    let rsp = client.get("List", Some(&json!("ID")), None).await.unwrap();

    assert!(rsp.success());
    assert_eq!(rsp.request_id(), Some("fast"));
}

#[tokio::test]
async fn test_second_timeout_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(retrieve_response("OK", "slow", ""))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client_with(&server, RetryConfig::once(), Duration::from_millis(300));
    let err = client
        .get("List", Some(&json!("ID")), None)
        .await
        .unwrap_err();

    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_missing_token_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = SoapConfig::builder()
        .with_endpoint(format!("{}/Service.asmx", server.uri()))
        .build();
    let mut client =
        SoapClient::new(ClientCredentials::new("client-id", "client-secret"), config).unwrap();

    let err = client
        .get("List", Some(&json!("ID")), None)
        .await
        .unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("Require legacy token for soap header"));
}

#[tokio::test]
async fn test_endpoint_resolved_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(retrieve_response("OK", "r-1", "")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let resolutions = Arc::new(AtomicUsize::new(0));
    let counter = resolutions.clone();
    let uri = server.uri();
    let resolver = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, fuel_sdk::auth::Error>(format!("{}/Service.asmx", uri))
    };

    let creds = ClientCredentials::new("client-id", "client-secret").with_internal_token("t");
    let mut client = SoapClient::with_resolver(creds, SoapConfig::default(), resolver).unwrap();

    client.get("List", Some(&json!("ID")), None).await.unwrap();
    client.get("List", Some(&json!("ID")), None).await.unwrap();

    assert_eq!(resolutions.load(Ordering::SeqCst), 1);
}
