use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::cache::CacheBucket;
use crate::error::{Error, Result};
use crate::filter::normalize_filter;
use crate::message;
use crate::response::{DescribeResponse, SoapResponse};
use crate::transport::SoapTransport;
use crate::types::{is_data_extension_like, SoapAction};

impl<T: SoapTransport> super::SoapClient<T> {
    /// Describe an object type's schema.
    ///
    /// A failed describe is returned, not raised.
    #[instrument(skip(self))]
    pub async fn describe(&self, object_type: &str) -> Result<DescribeResponse> {
        let message = message::describe_message(object_type);
        let raw = self.invoke(SoapAction::Describe, &message).await?;
        Ok(DescribeResponse::unpack(object_type, raw))
    }

    /// Describe `object_type`, raising `DescribeFailed` when it does not succeed.
    pub async fn get_all_object_properties(&self, object_type: &str) -> Result<DescribeResponse> {
        let rsp = self.describe(object_type).await?;
        if !rsp.success() {
            return Err(Error::describe_failed(object_type, rsp.into_response()));
        }
        Ok(rsp)
    }

    /// Properties that can be retrieved, from the cache or describe.
    ///
    /// Data-extension-like types have no retrievable set.
    pub async fn get_retrievable_properties(&mut self, object_type: &str) -> Result<Vec<String>> {
        self.cached_or_describe(CacheBucket::Retrievable, object_type)
            .await
    }

    /// Extended properties that can be edited, from the cache or describe.
    ///
    /// Data-extension-like types have no editable set.
    pub async fn get_editable_properties(&mut self, object_type: &str) -> Result<Vec<String>> {
        self.cached_or_describe(CacheBucket::Editable, object_type)
            .await
    }

    async fn cached_or_describe(
        &mut self,
        bucket: CacheBucket,
        object_type: &str,
    ) -> Result<Vec<String>> {
        if let Some(props) = self.cache.get(bucket, object_type) {
            return Ok(props.to_vec());
        }
        if is_data_extension_like(object_type) {
            return Ok(Vec::new());
        }

        debug!(?bucket, object_type, "Property cache miss");
        let rsp = self.get_all_object_properties(object_type).await?;
        let props = match bucket {
            CacheBucket::Retrievable => rsp.retrievable().to_vec(),
            CacheBucket::Editable => rsp.editable().to_vec(),
        };
        Ok(self.cache.put(bucket, object_type, props))
    }

    /// Field names of the data extension with `customer_key`.
    ///
    /// Raises `DescribeFailed` carrying the field retrieve when it does not
    /// succeed.
    #[instrument(skip(self))]
    pub async fn get_data_extension_fields(&self, customer_key: &str) -> Result<Vec<String>> {
        let filter = json!({
            "Property": "DataExtension.CustomerKey",
            "SimpleOperator": "equals",
            "Value": customer_key
        });
        let filter = normalize_filter(Some(&filter), "DataExtensionField")?;
        let message = message::retrieve_message("DataExtensionField", &["Name".to_string()], filter);
        let rsp = self.request(SoapAction::Retrieve, &message).await?;

        let object_type = format!("DataExtensionObject[{}]", customer_key);
        if !rsp.success() {
            warn!(customer_key, message = ?rsp.message(), "Data extension field lookup failed");
            return Err(Error::describe_failed(&object_type, rsp));
        }

        let fields: Vec<String> = rsp
            .results()
            .iter()
            .filter_map(|row| row.get("name").and_then(Value::as_str))
            .map(String::from)
            .collect();
        if fields.is_empty() {
            warn!(customer_key, "Data extension has no fields");
            return Err(unresolved(&object_type, rsp));
        }
        Ok(fields)
    }

    /// Customer key of the data extension called `name`.
    ///
    /// Raises `DescribeFailed` unless exactly one extension has that name.
    #[instrument(skip(self))]
    pub async fn get_data_extension_customer_key(&self, name: &str) -> Result<String> {
        let filter = json!({"Property": "Name", "SimpleOperator": "equals", "Value": name});
        let filter = normalize_filter(Some(&filter), "DataExtension")?;
        let message = message::retrieve_message("DataExtension", &["CustomerKey".to_string()], filter);
        let rsp = self.request(SoapAction::Retrieve, &message).await?;

        let object_type = format!("DataExtensionObject[{}]", name);
        if !rsp.success() {
            warn!(name, message = ?rsp.message(), "Data extension lookup failed");
            return Err(Error::describe_failed(&object_type, rsp));
        }

        let key = match rsp.results() {
            [row] => row.get("customer_key").and_then(Value::as_str).map(String::from),
            _ => None,
        };
        match key {
            Some(key) => Ok(key),
            None => {
                warn!(name, rows = rsp.results().len(), "No single data extension with name");
                Err(unresolved(&object_type, rsp))
            }
        }
    }

    /// Field names of the data extension called `name`, looked up by its customer key.
    pub(crate) async fn get_data_extension_fields_by_name(&self, name: &str) -> Result<Vec<String>> {
        let key = self.get_data_extension_customer_key(name).await?;
        debug!(name, customer_key = %key, "Resolved data extension key");
        self.get_data_extension_fields(&key).await
    }
}

/// A lookup that came back OK but resolved nothing usable.
fn unresolved(object_type: &str, mut rsp: SoapResponse) -> Error {
    rsp.set_success(false);
    Error::describe_failed(object_type, rsp)
}
