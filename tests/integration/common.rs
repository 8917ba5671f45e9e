use std::time::Duration;

use fuel_sdk::{ClientConfig, ClientCredentials, RetryConfig, SoapClient, SoapConfig};
use fuel_sdk_soap::HttpSoapTransport;
use wiremock::MockServer;

pub type Client = SoapClient<HttpSoapTransport<ClientCredentials>>;

pub const TOKEN: &str = "legacy-token";

/// Client posting to `server` with a legacy token and the default single retry.
pub fn client(server: &MockServer) -> Client {
    client_with(server, RetryConfig::once(), Duration::from_secs(5))
}

pub fn client_with(server: &MockServer, retry: RetryConfig, timeout: Duration) -> Client {
    fuel_sdk::init_tracing();

    let http = ClientConfig::builder()
        .with_retry(retry)
        .with_timeout(timeout)
        .build();
    let config = SoapConfig::builder()
        .with_endpoint(format!("{}/Service.asmx", server.uri()))
        .with_http_config(http)
        .with_debug(true)
        .build();
    let creds = ClientCredentials::new("client-id", "client-secret").with_internal_token(TOKEN);

    SoapClient::new(creds, config).expect("client should build")
}

pub fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><soap:Body>{}</soap:Body></soap:Envelope>"#,
        body
    )
}

pub fn retrieve_response(status: &str, request_id: &str, results: &str) -> String {
    envelope(&format!(
        r#"<RetrieveResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><OverallStatus>{}</OverallStatus><RequestID>{}</RequestID>{}</RetrieveResponseMsg>"#,
        status, request_id, results
    ))
}

pub fn create_response(status: &str, results: &str) -> String {
    envelope(&format!(
        r#"<CreateResponse xmlns="http://exacttarget.com/wsdl/partnerAPI">{}<RequestID>c-1</RequestID><OverallStatus>{}</OverallStatus></CreateResponse>"#,
        results, status
    ))
}

/// Subscriber definition with `FirstName` as the only editable attribute.
pub fn subscriber_definition() -> String {
    envelope(
        r#"<DefinitionResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><ObjectDefinition><ObjectType>Subscriber</ObjectType><Properties><Name>ID</Name><IsRetrievable>true</IsRetrievable><IsUpdatable>false</IsUpdatable></Properties><Properties><Name>EmailAddress</Name><IsRetrievable>true</IsRetrievable><IsUpdatable>true</IsUpdatable><IsRequired>true</IsRequired></Properties><ExtendedProperties><ExtendedProperty><Name>FirstName</Name><IsViewable>false</IsViewable><IsEditable>true</IsEditable></ExtendedProperty></ExtendedProperties></ObjectDefinition><RequestID>d-1</RequestID></DefinitionResponseMsg>"#,
    )
}

pub fn fault(message: &str) -> String {
    envelope(&format!(
        "<soap:Fault><faultcode>soap:Client</faultcode><faultstring>{}</faultstring></soap:Fault>",
        message
    ))
}
