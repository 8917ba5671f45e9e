//! Normalized SOAP responses.
//!
//! Unpacking never fails: anything that cannot be read from the envelope
//! degrades to a failed response whose message is the raw HTTP body.

use fuel_sdk_client::RawResponse;
use serde_json::Value;
use tracing::debug;

use crate::types::SoapAction;
use crate::xml;

const OVERALL_STATUS_OK: &str = "OK";
const MORE_DATA_AVAILABLE: &str = "MoreDataAvailable";

/// Result of one SOAP call.
#[derive(Debug, Clone)]
pub struct SoapResponse {
    code: u16,
    message: Option<String>,
    success: bool,
    results: Vec<Value>,
    request_id: Option<String>,
    more: bool,
    body: Value,
    raw: String,
}

impl SoapResponse {
    /// Unpack the raw outcome of `action`.
    pub fn unpack(action: SoapAction, raw: RawResponse) -> Self {
        let RawResponse { status, body: raw } = raw;

        let mut response = Self {
            code: status,
            message: None,
            success: false,
            results: Vec::new(),
            request_id: None,
            more: false,
            body: Value::Null,
            raw,
        };

        let body = match xml::parse(&response.raw) {
            Ok(mut doc) => doc
                .get_mut("envelope")
                .and_then(|e| e.get_mut("body"))
                .map(Value::take),
            Err(err) => {
                debug!(error = %err, "Unparseable SOAP response");
                None
            }
        };

        match body {
            Some(body) => {
                response.read_body(action, &body);
                response.body = body;
            }
            None => {
                response.message = Some(response.raw.clone());
                response.body = Value::String(response.raw.clone());
            }
        }

        response.success = response.message.as_deref() == Some(OVERALL_STATUS_OK);
        response
    }

    fn read_body(&mut self, action: SoapAction, body: &Value) {
        if let Some(fault) = body.get("fault") {
            self.message = fault
                .get("faultstring")
                .and_then(Value::as_str)
                .map(String::from);
            return;
        }

        let Some(wrapper) = body.get(action.response_wrapper()).filter(|w| w.is_object()) else {
            self.message = Some(self.raw.clone());
            return;
        };

        self.request_id = wrapper.get("request_id").and_then(text);
        let overall_status = wrapper.get("overall_status").and_then(Value::as_str);
        self.message = overall_status.map(String::from);
        self.more = overall_status == Some(MORE_DATA_AVAILABLE);
        self.results = as_list(wrapper.get("results"))
            .into_iter()
            .map(normalize_row)
            .collect();
    }

    /// Replace the message, keeping everything else.
    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    pub(crate) fn set_results(&mut self, results: Vec<Value>) {
        self.results = results;
    }

    /// HTTP status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// Overall status, fault string, or the raw body when nothing could be read.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True iff the overall status is exactly `OK`.
    pub fn success(&self) -> bool {
        self.success
    }

    /// Rows of this page.
    pub fn results(&self) -> &[Value] {
        &self.results
    }

    /// Take ownership of the rows.
    pub fn into_results(self) -> Vec<Value> {
        self.results
    }

    /// Request identifier used to continue a retrieve.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// True when the service has more rows for this retrieve.
    pub fn more(&self) -> bool {
        self.more
    }

    /// Parsed SOAP body, or the raw body as a string when it could not be parsed.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Raw HTTP body.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Request ids are usually GUIDs but may parse as other scalars.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Absent becomes empty, a single value becomes a one-element list.
pub(crate) fn as_list(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(list)) => list.clone(),
        Some(other) => vec![other.clone()],
    }
}

/// Attribute and property sub-lists of a row are always lists.
fn normalize_row(mut row: Value) -> Value {
    if let Some(map) = row.as_object_mut() {
        if let Some(attributes) = map.get_mut("attributes") {
            if !attributes.is_array() {
                *attributes = Value::Array(as_list(Some(attributes)));
            }
        }
        if let Some(property) = map
            .get_mut("properties")
            .and_then(|p| p.as_object_mut())
            .and_then(|p| p.get_mut("property"))
        {
            if !property.is_array() {
                *property = Value::Array(as_list(Some(property)));
            }
        }
    }
    row
}

/// Result of a describe: a response plus the object's property classes.
#[derive(Debug, Clone)]
pub struct DescribeResponse {
    response: SoapResponse,
    object_type: String,
    retrievable: Vec<String>,
    updatable: Vec<String>,
    required: Vec<String>,
    properties: Vec<String>,
    extended: Vec<String>,
    viewable: Vec<String>,
    editable: Vec<String>,
}

/// Never offered as retrievable.
const EXCLUDED_RETRIEVABLE: &str = "DataRetentionPeriod";

impl DescribeResponse {
    /// Unpack the raw outcome of describing `object_type`.
    ///
    /// A parseable object definition makes the response successful; the
    /// definition carries no overall status of its own.
    pub fn unpack(object_type: &str, raw: RawResponse) -> Self {
        let response = SoapResponse::unpack(SoapAction::Describe, raw);

        let mut describe = Self {
            response,
            object_type: object_type.to_string(),
            retrievable: Vec::new(),
            updatable: Vec::new(),
            required: Vec::new(),
            properties: Vec::new(),
            extended: Vec::new(),
            viewable: Vec::new(),
            editable: Vec::new(),
        };

        match describe.classify() {
            Some(rows) => {
                describe.response.set_success(true);
                describe.response.set_results(rows);
            }
            None => {
                describe.retrievable.clear();
                describe.updatable.clear();
                describe.required.clear();
                describe.properties.clear();
                describe.extended.clear();
                describe.viewable.clear();
                describe.editable.clear();
                describe.response.set_success(false);
                describe.response.set_results(Vec::new());
                describe.response.message = Some(format!("Unable to describe {}", object_type));
            }
        }
        describe
    }

    fn classify(&mut self) -> Option<Vec<Value>> {
        let definition = self
            .response
            .body
            .get(SoapAction::Describe.response_wrapper())?
            .get("object_definition")?;
        let definition = match definition {
            Value::Array(list) => list.first()?,
            other => other,
        };

        let props = match definition.get("properties")? {
            Value::Array(list) => list.clone(),
            single @ Value::Object(_) => vec![single.clone()],
            _ => return None,
        };

        for p in &props {
            let Some(name) = p.get("name").and_then(Value::as_str).map(String::from) else {
                continue;
            };
            if flag(p, "is_retrievable") && name != EXCLUDED_RETRIEVABLE {
                self.retrievable.push(name.clone());
            }
            if flag(p, "is_updatable") {
                self.updatable.push(name.clone());
            }
            if flag(p, "is_required") {
                self.required.push(name.clone());
            }
            self.properties.push(name);
        }

        let extended = as_list(
            definition
                .get("extended_properties")
                .and_then(|e| e.get("extended_property")),
        );

        for p in &extended {
            let Some(name) = p.get("name").and_then(Value::as_str).map(String::from) else {
                continue;
            };
            if flag(p, "is_viewable") {
                self.viewable.push(name.clone());
            }
            if flag(p, "is_editable") {
                self.editable.push(name.clone());
            }
            self.extended.push(name);
        }

        Some(props.into_iter().chain(extended).collect())
    }

    /// The described object type.
    pub fn object_type(&self) -> &str {
        &self.object_type
    }

    /// The underlying response.
    pub fn response(&self) -> &SoapResponse {
        &self.response
    }

    /// Take the underlying response.
    pub fn into_response(self) -> SoapResponse {
        self.response
    }

    /// True when the object definition was read.
    pub fn success(&self) -> bool {
        self.response.success()
    }

    /// Response message.
    pub fn message(&self) -> Option<&str> {
        self.response.message()
    }

    /// Base properties that can be retrieved.
    pub fn retrievable(&self) -> &[String] {
        &self.retrievable
    }

    /// Base properties that can be updated.
    pub fn updatable(&self) -> &[String] {
        &self.updatable
    }

    /// Base properties that are required.
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// All base property names.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// All extended property names.
    pub fn extended(&self) -> &[String] {
        &self.extended
    }

    /// Extended properties that are viewable.
    pub fn viewable(&self) -> &[String] {
        &self.viewable
    }

    /// Extended properties that are editable.
    pub fn editable(&self) -> &[String] {
        &self.editable
    }
}

fn flag(property: &Value, key: &str) -> bool {
    property.get(key).and_then(Value::as_bool).unwrap_or(false)
}
