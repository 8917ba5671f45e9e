//! Conversion between wire messages and XML.
//!
//! Outbound messages are rendered as escaped text. Inbound envelopes are read
//! with `quick_xml::Reader` into a `serde_json::Value` tree with snake_cased
//! local names.

use fuel_sdk_client::security::xml::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Render `value` as the element `name`, appending to `out`.
pub fn write_element(out: &mut String, name: &str, value: &Value) -> Result<()> {
    check_name(name)?;

    match value {
        Value::Array(items) => {
            for item in items {
                write_element(out, name, item)?;
            }
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(name);
            for (key, attr) in map.iter().filter(|(k, _)| k.starts_with('@')) {
                let attr_name = &key[1..];
                check_name(attr_name)?;
                let attr_value = scalar_text(attr).ok_or_else(|| {
                    Error::malformed(format!("Attribute {} must be a scalar", attr_name))
                })?;
                out.push(' ');
                out.push_str(attr_name);
                out.push_str("=\"");
                out.push_str(&escape(&attr_value));
                out.push('"');
            }

            let mut children = map.iter().filter(|(k, _)| !k.starts_with('@')).peekable();
            if children.peek().is_none() {
                out.push_str("/>");
                return Ok(());
            }
            out.push('>');
            for (key, child) in children {
                write_element(out, key, child)?;
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str(" xsi:nil=\"true\"/>");
        }
        scalar => {
            let text = scalar_text(scalar).unwrap_or_default();
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&escape(&text));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
    Ok(())
}

/// Render every entry of a message map as sibling elements.
pub fn write_children(out: &mut String, message: &Value) -> Result<()> {
    let map = message
        .as_object()
        .ok_or_else(|| Error::malformed("SOAP message must be a map"))?;
    for (key, value) in map.iter().filter(|(k, _)| !k.starts_with('@')) {
        write_element(out, key, value)?;
    }
    Ok(())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Check every key of `value`, at any depth, is usable as an element or attribute name.
pub(crate) fn check_names(value: &Value) -> Result<()> {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                check_name(key.strip_prefix('@').unwrap_or(key))?;
                check_names(child)?;
            }
            Ok(())
        }
        Value::Array(items) => items.iter().try_for_each(check_names),
        _ => Ok(()),
    }
}

/// Element and attribute names come from caller keys and cannot be escaped.
pub(crate) fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(Error::malformed(format!("Invalid XML name: {:?}", name)))
    }
}

/// ActiveSupport-style underscore: `RequestID` becomes `request_id`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        match c {
            '-' => out.push('_'),
            c => out.push(c.to_ascii_lowercase()),
        }
    }
    out
}

struct Frame {
    name: String,
    children: Map<String, Value>,
    text: String,
    nil: bool,
}

impl Frame {
    fn open(e: &BytesStart<'_>) -> Self {
        Self {
            name: snake_case(&String::from_utf8_lossy(e.local_name().as_ref())),
            children: Map::new(),
            text: String::new(),
            nil: is_nil(e),
        }
    }

    fn close(self) -> (String, Value) {
        let value = if self.nil {
            Value::Null
        } else if !self.children.is_empty() {
            Value::Object(self.children)
        } else {
            match self.text.as_str() {
                "" => Value::Null,
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(self.text),
            }
        };
        (self.name, value)
    }
}

fn is_nil(e: &BytesStart<'_>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"nil" && attr.value.as_ref() == b"true"
    })
}

/// Insert a child, collapsing repeated siblings into an array.
fn insert_child(children: &mut Map<String, Value>, name: String, value: Value) {
    match children.get_mut(&name) {
        Some(Value::Array(list)) => list.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            children.insert(name, value);
        }
    }
}

/// Parse an XML document into a value tree.
///
/// The result is a single-entry map from the root element's name to its value.
/// Leaf text is kept as sent; whitespace between child elements is dropped.
pub fn parse(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => stack.push(Frame::open(e)),
            Event::Empty(ref e) => {
                let (name, value) = Frame::open(e).close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::Text(ref e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(ref e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::new(crate::ErrorKind::Xml("Unbalanced end tag".into())))?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.children, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::new(crate::ErrorKind::Xml(
            "Unexpected end of document".into(),
        )));
    }

    let (name, value) =
        root.ok_or_else(|| Error::new(crate::ErrorKind::Xml("No root element found".into())))?;
    let mut doc = Map::new();
    doc.insert(name, value);
    Ok(Value::Object(doc))
}
