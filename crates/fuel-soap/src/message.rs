//! Wire message builders.
//!
//! A wire message is a `serde_json::Value` in document order. Keys starting
//! with `@` are attributes of the enclosing element, arrays repeat their
//! element and scalars become text. Everything here is pure; property sets
//! that need describe are resolved by the client before calling in.

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::filter::tagged;
use crate::xml;

/// Normalize the properties requested by a retrieve.
///
/// `None` means the caller asked for everything and the full retrievable set
/// must be resolved.
pub fn normalize_retrieve_properties(properties: Option<&Value>) -> Result<Option<Vec<String>>> {
    let Some(properties) = properties else {
        return Ok(None);
    };

    match properties {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(vec![s.clone()])),
        Value::Object(map) if map.is_empty() => Ok(None),
        Value::Object(map) => Ok(Some(map.keys().cloned().collect())),
        Value::Array(list) if list.is_empty() => Ok(None),
        Value::Array(list) => list
            .iter()
            .map(|p| p.as_str().map(String::from))
            .collect::<Option<Vec<_>>>()
            .map(Some)
            .ok_or_else(|| Error::malformed("Retrieve properties must be a list of names")),
        other => Err(Error::malformed(format!(
            "Retrieve properties must be names, got {}",
            other
        ))),
    }
}

/// `{RetrieveRequest: {ObjectType, Properties, Filter?}}`.
pub fn retrieve_message(object_type: &str, properties: &[String], filter: Option<Value>) -> Value {
    let mut request = Map::new();
    request.insert("ObjectType".to_string(), Value::String(object_type.to_string()));
    request.insert("Properties".to_string(), json!(properties));
    if let Some(filter) = filter {
        request.insert("Filter".to_string(), filter);
    }
    json!({ "RetrieveRequest": request })
}

/// Retrieve the next page of a prior retrieve.
pub fn continue_message(request_id: &str) -> Value {
    json!({ "RetrieveRequest": { "ContinueRequest": request_id } })
}

/// Type-scoped describe request.
pub fn describe_message(object_type: &str) -> Value {
    json!({
        "DescribeRequests": {
            "ObjectDefinitionRequest": { "ObjectType": object_type }
        }
    })
}

/// Normalize create/update/delete input to a list of maps.
pub fn normalize_objects(properties: &Value) -> Result<Vec<Map<String, Value>>> {
    let items: Vec<&Value> = match properties {
        Value::Array(list) => list.iter().collect(),
        other => vec![other],
    };

    match items.first() {
        Some(Value::Object(_)) => {}
        _ => return Err(Error::malformed("Object properties must be a Hash")),
    }

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(map.clone()),
            _ => Err(Error::malformed("Object properties must be a List of Hashes")),
        })
        .collect()
}

/// Reject object keys that cannot be rendered as element names.
///
/// Top-level keys of data-extension rows become property names, so only
/// their values are checked.
pub fn check_object_names(objects: &[Map<String, Value>], data_extension: bool) -> Result<()> {
    for (key, value) in objects.iter().flatten() {
        if !data_extension {
            xml::check_name(key.strip_prefix('@').unwrap_or(key))?;
        }
        xml::check_names(value)?;
    }
    Ok(())
}

/// `[{Name, Value}, ...]` for every entry of `pairs`.
pub fn name_value_pairs(pairs: Map<String, Value>) -> Vec<Value> {
    pairs
        .into_iter()
        .map(|(name, value)| json!({ "Name": name, "Value": value }))
        .collect()
}

/// Move editable extended properties of a regular object into `Attributes`.
///
/// Keys named in `editable` leave the top level and are appended, after any
/// `Attributes` the caller already supplied, as name/value pairs.
pub fn split_attributes(object: Map<String, Value>, editable: &[String]) -> Map<String, Value> {
    let mut out = Map::new();
    let mut moved = Map::new();
    let mut attributes = Vec::new();

    for (key, value) in object {
        if key == "Attributes" {
            match value {
                Value::Array(list) => attributes.extend(list),
                other => attributes.push(other),
            }
        } else if editable.iter().any(|e| *e == key) {
            moved.insert(key, value);
        } else {
            out.insert(key, value);
        }
    }

    attributes.extend(name_value_pairs(moved));
    if !attributes.is_empty() {
        out.insert("Attributes".to_string(), Value::Array(attributes));
    }
    out
}

/// Move every key of a data-extension row except `CustomerKey` into
/// `Properties.Property`.
pub fn split_data_extension_properties(object: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    let mut moved = Map::new();
    let mut existing = Vec::new();

    for (key, value) in object {
        match key.as_str() {
            "CustomerKey" | "@xsi:type" => {
                out.insert(key, value);
            }
            "Properties" => match value {
                Value::Object(mut props) => match props.remove("Property") {
                    Some(Value::Array(list)) => existing.extend(list),
                    Some(single) => existing.push(single),
                    None => {}
                },
                other => {
                    moved.insert(key, other);
                }
            },
            _ => {
                moved.insert(key, value);
            }
        }
    }

    existing.extend(name_value_pairs(moved));
    if !existing.is_empty() {
        out.insert(
            "Properties".to_string(),
            json!({ "Property": existing }),
        );
    }
    out
}

/// `{Options?, Objects: [...]}` with every object tagged `tns:<object_type>`.
pub fn objects_message(
    object_type: &str,
    objects: Vec<Map<String, Value>>,
    options: Option<Value>,
) -> Value {
    let xsi_type = format!("tns:{}", object_type);
    let objects: Vec<Value> = objects
        .into_iter()
        .map(|object| tagged(&xsi_type, object))
        .collect();

    let mut message = Map::new();
    if let Some(options) = options {
        message.insert("Options".to_string(), options);
    }
    message.insert("Objects".to_string(), Value::Array(objects));
    Value::Object(message)
}

/// Options turning an update into "update or add".
pub fn upsert_options(options: Option<&Value>) -> Value {
    let mut merged = match options {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };
    merged.insert(
        "SaveOptions".to_string(),
        json!({
            "SaveOption": {
                "PropertyName": "*",
                "SaveAction": "UpdateAdd"
            }
        }),
    );
    Value::Object(merged)
}

/// Which collection an action message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// `Definitions` of a perform.
    Definitions,
    /// `Configurations` of a configure.
    Configurations,
}

impl ActionKind {
    fn plural(&self) -> &'static str {
        match self {
            Self::Definitions => "Definitions",
            Self::Configurations => "Configurations",
        }
    }

    fn singular(&self) -> &'static str {
        match self {
            Self::Definitions => "Definition",
            Self::Configurations => "Configuration",
        }
    }
}

/// `{Action: verb, <Plural>: {<Singular>: [tagged items]}}`.
pub fn action_message(kind: ActionKind, object_type: &str, properties: &Value, verb: &str) -> Value {
    let xsi_type = format!("tns:{}", object_type);
    let items: Vec<Value> = match properties {
        Value::Array(list) => list.clone(),
        other => vec![other.clone()],
    };
    let items: Vec<Value> = items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => tagged(&xsi_type, map),
            other => other,
        })
        .collect();

    let mut inner = Map::new();
    inner.insert(kind.singular().to_string(), Value::Array(items));

    let mut message = Map::new();
    message.insert("Action".to_string(), Value::String(verb.to_string()));
    message.insert(kind.plural().to_string(), Value::Object(inner));
    Value::Object(message)
}
