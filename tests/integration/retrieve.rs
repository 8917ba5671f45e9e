//! Retrieve, describe and continuation over HTTP.

use super::common::{client, fault, retrieve_response, subscriber_definition, TOKEN};
use fuel_sdk::Filter;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_retrieve_with_filter() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Service.asmx"))
        .and(header("SOAPAction", "Retrieve"))
        .and(body_string_contains(format!("<oAuthToken>{}</oAuthToken>", TOKEN)))
        .and(body_string_contains("<ObjectType>List</ObjectType>"))
        .and(body_string_contains("<Properties>ID</Properties><Properties>ListName</Properties>"))
        .and(body_string_contains(r#"<Filter xsi:type="tns:SimpleFilterPart">"#))
        .and(body_string_contains("<Property>ListName</Property>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "OK",
            "r-1",
            "<Results><ID>12</ID><ListName>Newsletter</ListName></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let filter: Value = Filter::equals("ListName", "Newsletter").into();
    let rsp = client
        .get("List", Some(&json!(["ID", "ListName"])), Some(&filter))
        .await
        .expect("retrieve should return a response");

    assert!(rsp.success());
    assert_eq!(rsp.code(), 200);
    assert_eq!(rsp.request_id(), Some("r-1"));
    assert_eq!(rsp.results(), &[json!({"id": "12", "list_name": "Newsletter"})]);
}

#[tokio::test]
async fn test_retrieve_all_properties_describes_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .and(body_string_contains("<ObjectType>Subscriber</ObjectType>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(subscriber_definition()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Retrieve"))
        .and(body_string_contains(
            "<Properties>ID</Properties><Properties>EmailAddress</Properties>",
        ))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(retrieve_response("OK", "r-1", "")),
        )
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client(&server);
    for _ in 0..2 {
        let rsp = client.get("Subscriber", None, None).await.unwrap();
        assert!(rsp.success());
        assert!(rsp.results().is_empty());
    }
}

#[tokio::test]
async fn test_retrieve_unknown_type_returns_failed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault("Invalid object type")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client.get("Nope", None, None).await.unwrap();

    assert!(!rsp.success());
    assert_eq!(rsp.code(), 500);
    assert_eq!(rsp.message(), Some("Unable to get Nope"));
}

#[tokio::test]
async fn test_fault_is_a_failed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(fault("Login failed")))
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client.get("List", Some(&json!("ID")), None).await.unwrap();

    assert!(!rsp.success());
    assert_eq!(rsp.message(), Some("Login failed"));
    assert!(rsp.results().is_empty());
}

#[tokio::test]
async fn test_unparseable_body_is_kept_as_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client.get("List", Some(&json!("ID")), None).await.unwrap();

    assert!(!rsp.success());
    assert_eq!(rsp.code(), 502);
    assert_eq!(rsp.message(), Some("Bad Gateway"));
}

#[tokio::test]
async fn test_continue_until_done() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ObjectType>SentEvent</ObjectType>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "MoreDataAvailable",
            "page-guid",
            "<Results><EventDate>2024-01-01</EventDate></Results><Results><EventDate>2024-01-02</EventDate></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ContinueRequest>page-guid</ContinueRequest>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "OK",
            "page-guid",
            "<Results><EventDate>2024-01-03</EventDate></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let mut page = client
        .get("SentEvent", Some(&json!(["EventDate"])), None)
        .await
        .unwrap();
    assert!(page.more());

    let mut rows = page.results().to_vec();
    while let Some(next) = client.continue_retrieve(&page).await.unwrap() {
        rows.extend_from_slice(next.results());
        page = next;
    }

    assert!(page.success());
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["event_date"], "2024-01-03");
}

#[tokio::test]
async fn test_data_extension_rows_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ObjectType>DataExtension</ObjectType>"))
        .and(body_string_contains("<Property>Name</Property>"))
        .and(body_string_contains("<Value>Members</Value>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "OK",
            "r-1",
            "<Results><CustomerKey>members-key</CustomerKey></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ObjectType>DataExtensionField</ObjectType>"))
        .and(body_string_contains("<Property>DataExtension.CustomerKey</Property>"))
        .and(body_string_contains("<Value>members-key</Value>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "OK",
            "r-2",
            "<Results><Name>Email</Name></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(body_string_contains("<ObjectType>DataExtensionObject[Members]</ObjectType>"))
        .and(body_string_contains("<Properties>Email</Properties>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(retrieve_response(
            "OK",
            "r-3",
            "<Results><Properties><Property><Name>Email</Name><Value>a@b.com</Value></Property></Properties></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client
        .get("DataExtensionObject[Members]", None, None)
        .await
        .unwrap();

    assert!(rsp.success());
    assert_eq!(rsp.request_id(), Some("r-3"));
    assert_eq!(
        rsp.results()[0]["properties"]["property"][0]["value"],
        "a@b.com"
    );
}
