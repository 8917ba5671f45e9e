//! Scripted transport and canned envelopes for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use fuel_sdk_client::RawResponse;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::transport::SoapTransport;
use crate::types::SoapAction;

/// Replays queued outcomes in order and records every call.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<RawResponse>>>,
    calls: Mutex<Vec<(SoapAction, Value)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, raw: RawResponse) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(raw));
        self
    }

    pub(crate) fn fail_transport(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(Error::new(ErrorKind::Transport(message.to_string()))));
        self
    }

    pub(crate) fn fail_config(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(Error::new(ErrorKind::Config(message.to_string()))));
        self
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<(SoapAction, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_message(&self) -> Value {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, message)| message.clone())
            .unwrap_or(Value::Null)
    }
}

impl SoapTransport for ScriptedTransport {
    async fn call(&self, action: SoapAction, message: &Value) -> Result<RawResponse> {
        self.calls.lock().unwrap().push((action, message.clone()));
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::new(ErrorKind::Transport("script exhausted".into()))))
    }
}

pub(crate) fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <soap:Body>{}</soap:Body>
</soap:Envelope>"#,
        body
    )
}

pub(crate) fn retrieve(status: &str, request_id: &str, results: &str) -> RawResponse {
    RawResponse::new(
        200,
        envelope(&format!(
            r#"<RetrieveResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><OverallStatus>{}</OverallStatus><RequestID>{}</RequestID>{}</RetrieveResponseMsg>"#,
            status, request_id, results
        )),
    )
}

pub(crate) fn retrieve_ok(results: &str) -> RawResponse {
    retrieve("OK", "req-1", results)
}

pub(crate) fn create_ok(results: &str) -> RawResponse {
    cud("CreateResponse", "OK", results)
}

pub(crate) fn cud(wrapper: &str, status: &str, results: &str) -> RawResponse {
    RawResponse::new(
        200,
        envelope(&format!(
            r#"<{w} xmlns="http://exacttarget.com/wsdl/partnerAPI">{}<RequestID>r-1</RequestID><OverallStatus>{}</OverallStatus></{w}>"#,
            results,
            status,
            w = wrapper
        )),
    )
}

/// Describe response with `(name, retrievable)` base properties and
/// `(name, editable)` extended properties.
pub(crate) fn definition(properties: &[(&str, bool)], extended: &[(&str, bool)]) -> RawResponse {
    let props: String = properties
        .iter()
        .map(|(name, retrievable)| {
            format!(
                "<Properties><Name>{}</Name><IsRetrievable>{}</IsRetrievable></Properties>",
                name, retrievable
            )
        })
        .collect();
    let ext: String = extended
        .iter()
        .map(|(name, editable)| {
            format!(
                "<ExtendedProperty><Name>{}</Name><IsEditable>{}</IsEditable></ExtendedProperty>",
                name, editable
            )
        })
        .collect();
    let ext = if ext.is_empty() {
        String::new()
    } else {
        format!("<ExtendedProperties>{}</ExtendedProperties>", ext)
    };

    RawResponse::new(
        200,
        envelope(&format!(
            r#"<DefinitionResponseMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"><ObjectDefinition>{}{}</ObjectDefinition><RequestID>d-1</RequestID></DefinitionResponseMsg>"#,
            props, ext
        )),
    )
}

pub(crate) fn fault(message: &str) -> RawResponse {
    RawResponse::new(
        500,
        envelope(&format!(
            "<soap:Fault><faultcode>soap:Client</faultcode><faultstring>{}</faultstring></soap:Fault>",
            message
        )),
    )
}
