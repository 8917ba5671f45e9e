//! Typed facades over the generic operations.
//!
//! Each facade names one object type and carries the loose properties and
//! filter sent with it. Reading and writing go through [`Readable`] and
//! [`Writable`], whose default methods forward to the [`SoapClient`].
//!
//! ```rust,ignore
//! use fuel_sdk_soap::objects::{Readable, Subscriber};
//! use fuel_sdk_soap::{Filter, SoapClient};
//! use serde_json::json;
//!
//! let mut client = SoapClient::from_env()?;
//! let subscribers = Subscriber::new(json!(["EmailAddress", "Status"]))
//!     .with_filter(Filter::equals("Status", "Active"));
//! let rsp = subscribers.get(&mut client).await?;
//! ```

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::client::SoapClient;
use crate::error::{Error, ErrorKind, Result};
use crate::response::{DescribeResponse, SoapResponse};
use crate::transport::SoapTransport;

/// An object type plus the properties and filter sent with it.
pub trait SoapObject {
    /// Wire object type.
    fn object_type(&self) -> &str;

    /// Loose properties: names to retrieve, or object maps to write.
    fn properties(&self) -> &Value;

    /// Retrieve filter.
    fn filter(&self) -> Option<&Value> {
        None
    }
}

/// Object types that can be retrieved and described.
#[allow(async_fn_in_trait)]
pub trait Readable: SoapObject {
    /// Retrieve with this object's properties and filter.
    async fn get<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        client
            .get(self.object_type(), Some(self.properties()), self.filter())
            .await
    }

    /// Describe this object type.
    async fn info<T: SoapTransport>(&self, client: &SoapClient<T>) -> Result<DescribeResponse> {
        client.describe(self.object_type()).await
    }
}

/// Object types that can be created, updated and deleted.
#[allow(async_fn_in_trait)]
pub trait Writable: SoapObject {
    /// Create this object's properties.
    async fn post<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        client
            .post(self.object_type(), self.properties(), None)
            .await
    }

    /// Update with this object's properties.
    async fn patch<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        client
            .patch(self.object_type(), self.properties(), None)
            .await
    }

    /// Delete the objects these properties identify.
    async fn delete<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        client
            .delete(self.object_type(), self.properties(), None)
            .await
    }

    /// Update, adding objects that do not exist.
    async fn upsert<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        client
            .upsert(self.object_type(), self.properties(), None)
            .await
    }
}

macro_rules! soap_object {
    ($(#[$meta:meta])* $name:ident => $object_type:literal $(, $capability:ident)*) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            /// Loose properties.
            pub properties: Value,
            /// Retrieve filter.
            pub filter: Option<Value>,
        }

        impl $name {
            pub fn new(properties: impl Into<Value>) -> Self {
                Self {
                    properties: properties.into(),
                    filter: None,
                }
            }

            pub fn with_filter(mut self, filter: impl Into<Value>) -> Self {
                self.filter = Some(filter.into());
                self
            }
        }

        impl SoapObject for $name {
            fn object_type(&self) -> &str {
                $object_type
            }

            fn properties(&self) -> &Value {
                &self.properties
            }

            fn filter(&self) -> Option<&Value> {
                self.filter.as_ref()
            }
        }

        $(impl $capability for $name {})*
    };
}

soap_object!(
    /// Email subscriber.
    Subscriber => "Subscriber", Readable, Writable
);
soap_object!(List => "List", Readable, Writable);
soap_object!(
    /// Membership of subscribers in lists.
    ListSubscriber => "ListSubscriber", Readable
);
soap_object!(Email => "Email", Readable, Writable);
soap_object!(ContentArea => "ContentArea", Readable, Writable);
soap_object!(DataFolder => "DataFolder", Readable, Writable);
soap_object!(BounceEvent => "BounceEvent", Readable);
soap_object!(ClickEvent => "ClickEvent", Readable);
soap_object!(OpenEvent => "OpenEvent", Readable);
soap_object!(SentEvent => "SentEvent", Readable);
soap_object!(UnsubEvent => "UnsubEvent", Readable);
soap_object!(
    /// Columns of data extensions.
    DataExtensionColumn => "DataExtensionField", Readable
);

/// Triggered send definition, sendable to a set of subscribers.
#[derive(Debug, Clone, Default)]
pub struct TriggeredSendDefinition {
    pub properties: Value,
    pub filter: Option<Value>,
    pub subscribers: Value,
}

impl TriggeredSendDefinition {
    pub fn new(properties: impl Into<Value>) -> Self {
        Self {
            properties: properties.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_subscribers(mut self, subscribers: impl Into<Value>) -> Self {
        self.subscribers = subscribers.into();
        self
    }

    /// Fire the definition for `subscribers` by creating a `TriggeredSend`.
    pub async fn send<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let send = json!({
            "TriggeredSendDefinition": self.properties,
            "Subscribers": self.subscribers,
        });
        client.post("TriggeredSend", &send, None).await
    }
}

impl SoapObject for TriggeredSendDefinition {
    fn object_type(&self) -> &str {
        "TriggeredSendDefinition"
    }

    fn properties(&self) -> &Value {
        &self.properties
    }

    fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }
}

impl Readable for TriggeredSendDefinition {}
impl Writable for TriggeredSendDefinition {}

/// Data extension definitions.
///
/// Fields may be given per definition under `columns` or `fields`, as an
/// explicit `Fields.Field`, or once for a single definition through
/// [`with_fields`](Self::with_fields).
#[derive(Debug, Clone, Default)]
pub struct DataExtension {
    pub properties: Value,
    pub filter: Option<Value>,
    pub fields: Option<Value>,
}

impl DataExtension {
    pub fn new(properties: impl Into<Value>) -> Self {
        Self {
            properties: properties.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<Value>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    fn has_fields(&self) -> bool {
        match &self.fields {
            None | Some(Value::Null) => false,
            Some(Value::Array(list)) => !list.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
            Some(_) => true,
        }
    }

    /// Definitions with their fields moved under `Fields.Field`.
    pub fn munged(&self) -> Result<Value> {
        let has_fields = self.has_fields();

        if let Value::Array(list) = &self.properties {
            if list.len() > 1 && has_fields {
                return Err(Error::malformed(
                    "Unable to handle multiple DataExtension definitions and a field definition",
                ));
            }
        }

        match &self.properties {
            Value::Array(list) => list
                .iter()
                .map(|definition| self.munge_one(definition, has_fields))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            single => self.munge_one(single, has_fields),
        }
    }

    fn munge_one(&self, definition: &Value, has_fields: bool) -> Result<Value> {
        let Value::Object(definition) = definition else {
            return Ok(definition.clone());
        };
        let mut definition: Map<String, Value> = definition.clone();

        let explicit = definition
            .get("Fields")
            .and_then(|f| f.get("Field"))
            .is_some_and(|f| !f.is_null());
        let columns = definition.contains_key("columns");
        let fields = definition.contains_key("fields");

        if (explicit && (columns || fields || has_fields))
            || (columns && (fields || has_fields))
            || (fields && has_fields)
        {
            return Err(Error::malformed(
                "Fields are defined in too many ways. Please only define once.",
            ));
        }

        if explicit {
            return Ok(Value::Object(definition));
        }

        let field = definition
            .remove("columns")
            .or_else(|| definition.remove("fields"))
            .or_else(|| self.fields.clone())
            .filter(|f| !f.is_null())
            .ok_or_else(|| Error::malformed("DataExtension needs at least one field."))?;

        definition.insert("Fields".to_string(), json!({ "Field": field }));
        Ok(Value::Object(definition))
    }
}

impl SoapObject for DataExtension {
    fn object_type(&self) -> &str {
        "DataExtension"
    }

    fn properties(&self) -> &Value {
        &self.properties
    }

    fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }
}

impl Readable for DataExtension {}

impl Writable for DataExtension {
    async fn post<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let definitions = self.munged()?;
        client.post(self.object_type(), &definitions, None).await
    }

    async fn patch<T: SoapTransport>(&self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let definitions = self.munged()?;
        client.patch(self.object_type(), &definitions, None).await
    }
}

/// Rows of one data extension, addressed by name or customer key.
///
/// Whichever of the two is missing is looked up on first use.
#[derive(Debug, Clone, Default)]
pub struct DataExtensionRow {
    pub properties: Value,
    pub filter: Option<Value>,
    name: Option<String>,
    customer_key: Option<String>,
}

impl DataExtensionRow {
    pub fn new(properties: impl Into<Value>) -> Self {
        Self {
            properties: properties.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_customer_key(mut self, customer_key: impl Into<String>) -> Self {
        self.customer_key = Some(customer_key.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn customer_key(&self) -> Option<&str> {
        self.customer_key.as_deref()
    }

    /// Fill in the missing name or customer key from the `DataExtension`.
    ///
    /// Returns `(name, customer_key)`.
    pub async fn resolve<T: SoapTransport>(
        &mut self,
        client: &mut SoapClient<T>,
    ) -> Result<(String, String)> {
        let (property, value) = match (&self.name, &self.customer_key) {
            (Some(name), Some(key)) => return Ok((name.clone(), key.clone())),
            (None, None) => {
                return Err(Error::malformed(
                    "Unable to process DataExtensionRow request due to missing CustomerKey and Name",
                ))
            }
            (None, Some(key)) => ("CustomerKey", key.clone()),
            (Some(name), None) => ("Name", name.clone()),
        };

        debug!(property, value = %value, "Resolving data extension");
        let filter = json!({
            "Property": property,
            "SimpleOperator": "equals",
            "Value": value,
        });
        let rsp = client
            .get("DataExtension", Some(&json!(["Name", "CustomerKey"])), Some(&filter))
            .await?;

        let found = match rsp.results() {
            [row] if rsp.success() => row,
            _ => {
                return Err(Error::new(ErrorKind::NotFound(format!(
                    "Unable to process DataExtensionRow: no single DataExtension with {} {}",
                    property, value
                ))))
            }
        };

        let name = found.get("name").and_then(Value::as_str).map(String::from);
        let key = found
            .get("customer_key")
            .and_then(Value::as_str)
            .map(String::from);
        match (name, key) {
            (Some(name), Some(key)) => {
                self.name = Some(name.clone());
                self.customer_key = Some(key.clone());
                Ok((name, key))
            }
            _ => Err(Error::new(ErrorKind::NotFound(
                "Unable to process DataExtensionRow: DataExtension is missing Name or CustomerKey"
                    .to_string(),
            ))),
        }
    }

    /// Retrieve rows of the extension.
    ///
    /// Without properties, every field of the extension is retrieved.
    pub async fn get<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let (name, key) = self.resolve(client).await?;
        let object_type = format!("DataExtensionObject[{}]", name);

        let mut properties = self.properties.clone();
        if crate::message::normalize_retrieve_properties(Some(&properties))?.is_none() {
            properties = match client.get_data_extension_fields(&key).await {
                Ok(fields) => json!(fields),
                Err(err) => return err.into_failed_response(),
            };
        }

        client
            .get(&object_type, Some(&properties), self.filter.as_ref())
            .await
    }

    pub async fn post<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let rows = self.keyed_rows(client).await?;
        client.post(self.object_type(), &rows, None).await
    }

    pub async fn patch<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let rows = self.keyed_rows(client).await?;
        client.patch(self.object_type(), &rows, None).await
    }

    pub async fn delete<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let rows = self.keyed_rows(client).await?;
        client.delete(self.object_type(), &rows, None).await
    }

    pub async fn upsert<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<SoapResponse> {
        let rows = self.keyed_rows(client).await?;
        client.upsert(self.object_type(), &rows, None).await
    }

    /// Rows with `CustomerKey` added where absent.
    async fn keyed_rows<T: SoapTransport>(&mut self, client: &mut SoapClient<T>) -> Result<Value> {
        let (_, key) = self.resolve(client).await?;

        let add_key = |row: &Value| match row {
            Value::Object(map) if !map.contains_key("CustomerKey") => {
                let mut map = map.clone();
                map.insert("CustomerKey".to_string(), Value::String(key.clone()));
                Value::Object(map)
            }
            other => other.clone(),
        };

        Ok(match &self.properties {
            Value::Array(rows) => Value::Array(rows.iter().map(add_key).collect()),
            row => add_key(row),
        })
    }
}

impl SoapObject for DataExtensionRow {
    fn object_type(&self) -> &str {
        "DataExtensionObject"
    }

    fn properties(&self) -> &Value {
        &self.properties
    }

    fn filter(&self) -> Option<&Value> {
        self.filter.as_ref()
    }
}
