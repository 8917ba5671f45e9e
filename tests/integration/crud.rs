//! Create, update, perform and the helpers built on them, over HTTP.

use super::common::{client, create_response, envelope, subscriber_definition};
use fuel_sdk::soap::objects::{DataExtensionRow, Readable, Subscriber, Writable};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_describe_then_create_with_attributes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(subscriber_definition()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Create"))
        .and(body_string_contains("<CreateRequest>"))
        .and(body_string_contains(r#"<Objects xsi:type="tns:Subscriber">"#))
        .and(body_string_contains("<EmailAddress>a@b.com</EmailAddress>"))
        .and(body_string_contains(
            "<Attributes><Name>FirstName</Name><Value>Dev</Value></Attributes>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(create_response(
            "OK",
            "<Results><StatusCode>OK</StatusCode><NewID>42</NewID></Results>",
        )))
        .expect(2)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client
        .post(
            "Subscriber",
            &json!({"EmailAddress": "a@b.com", "FirstName": "Dev"}),
            None,
        )
        .await
        .unwrap();
    assert!(rsp.success());
    assert_eq!(rsp.results()[0]["new_id"], "42");

    // Second write reuses the cached editable set.
    let rsp = Subscriber::new(json!({"EmailAddress": "a@b.com", "FirstName": "Dev"}))
        .post(&mut client)
        .await
        .unwrap();
    assert!(rsp.success());
}

#[tokio::test]
async fn test_upsert_sends_save_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(subscriber_definition()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Update"))
        .and(body_string_contains("<UpdateRequest><Options><SaveOptions><SaveOption><PropertyName>*</PropertyName><SaveAction>UpdateAdd</SaveAction>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<UpdateResponse xmlns="http://exacttarget.com/wsdl/partnerAPI"><Results><StatusCode>OK</StatusCode></Results><OverallStatus>OK</OverallStatus></UpdateResponse>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client
        .upsert("Subscriber", &json!({"EmailAddress": "a@b.com"}), None)
        .await
        .unwrap();
    assert!(rsp.success());
}

#[tokio::test]
async fn test_data_extension_row_round_trip() {
    let server = MockServer::start().await;

    // Customer key lookup by name.
    Mock::given(method("POST"))
        .and(header("SOAPAction", "Retrieve"))
        .and(body_string_contains("<ObjectType>DataExtension</ObjectType>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<RetrieveResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><OverallStatus>OK</OverallStatus><RequestID>r-1</RequestID><Results><Name>Members</Name><CustomerKey>members-key</CustomerKey></Results></RetrieveResponseMsg>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Create"))
        .and(body_string_contains(r#"<Objects xsi:type="tns:DataExtensionObject">"#))
        .and(body_string_contains("<CustomerKey>members-key</CustomerKey>"))
        .and(body_string_contains(
            "<Properties><Property><Name>Email</Name><Value>a@b.com</Value></Property></Properties>",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(create_response("OK", "")))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let mut row = DataExtensionRow::new(json!({"Email": "a@b.com"})).with_name("Members");
    let rsp = row.post(&mut client).await.unwrap();

    assert!(rsp.success());
    assert_eq!(row.customer_key(), Some("members-key"));
}

#[tokio::test]
async fn test_perform_and_describe_facade() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Perform"))
        .and(body_string_contains("<PerformRequestMsg><Action>start</Action>"))
        .and(body_string_contains(
            r#"<Definitions><Definition xsi:type="tns:QueryDefinition"><ObjectID>q-1</ObjectID></Definition></Definitions>"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<PerformResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><Results><Result><StatusCode>OK</StatusCode></Result></Results><OverallStatus>OK</OverallStatus><RequestID>p-1</RequestID></PerformResponseMsg>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(subscriber_definition()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let rsp = client
        .perform("QueryDefinition", &json!({"ObjectID": "q-1"}), "start")
        .await
        .unwrap();
    assert!(rsp.success());
    assert_eq!(rsp.request_id(), Some("p-1"));

    let described = Subscriber::default().info(&client).await.unwrap();
    assert!(described.success());
    assert_eq!(described.retrievable(), ["ID", "EmailAddress"]);
    assert_eq!(described.updatable(), ["EmailAddress"]);
    assert_eq!(described.required(), ["EmailAddress"]);
    assert_eq!(described.editable(), ["FirstName"]);
    assert!(described.viewable().is_empty());
}

#[tokio::test]
async fn test_add_existing_subscriber_to_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Describe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(subscriber_definition()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Create"))
        .and(body_string_contains("<Lists><ID>7</ID></Lists>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(create_response(
            "Error",
            "<Results><StatusCode>Error</StatusCode><ErrorCode>12014</ErrorCode></Results>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(header("SOAPAction", "Update"))
        .and(body_string_contains("<Lists><ID>7</ID></Lists>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
            r#"<UpdateResponse xmlns="http://exacttarget.com/wsdl/partnerAPI"><OverallStatus>OK</OverallStatus></UpdateResponse>"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client(&server);
    let rsp = client
        .add_subscriber_to_list("a@b.com", &["7"], None)
        .await
        .unwrap();
    assert!(rsp.success());
}
