use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::message::{self, ActionKind};
use crate::objects::{DataExtension, Writable};
use crate::response::SoapResponse;
use crate::transport::SoapTransport;
use crate::types::{is_data_extension_like, SoapAction};

/// Error code reported when creating a subscriber that already exists.
const SUBSCRIBER_EXISTS: &str = "12014";

impl<T: SoapTransport> super::SoapClient<T> {
    /// Create one or more objects.
    #[instrument(skip(self, properties, options))]
    pub async fn post(
        &mut self,
        object_type: &str,
        properties: &Value,
        options: Option<&Value>,
    ) -> Result<SoapResponse> {
        self.cud(SoapAction::Create, object_type, properties, options.cloned())
            .await
    }

    /// Update one or more objects.
    #[instrument(skip(self, properties, options))]
    pub async fn patch(
        &mut self,
        object_type: &str,
        properties: &Value,
        options: Option<&Value>,
    ) -> Result<SoapResponse> {
        self.cud(SoapAction::Update, object_type, properties, options.cloned())
            .await
    }

    /// Delete one or more objects.
    #[instrument(skip(self, properties, options))]
    pub async fn delete(
        &mut self,
        object_type: &str,
        properties: &Value,
        options: Option<&Value>,
    ) -> Result<SoapResponse> {
        self.cud(SoapAction::Delete, object_type, properties, options.cloned())
            .await
    }

    /// Update one or more objects, adding those that do not exist.
    #[instrument(skip(self, properties, options))]
    pub async fn upsert(
        &mut self,
        object_type: &str,
        properties: &Value,
        options: Option<&Value>,
    ) -> Result<SoapResponse> {
        let options = message::upsert_options(options);
        self.cud(SoapAction::Update, object_type, properties, Some(options))
            .await
    }

    async fn cud(
        &mut self,
        action: SoapAction,
        object_type: &str,
        properties: &Value,
        options: Option<Value>,
    ) -> Result<SoapResponse> {
        let objects = message::normalize_objects(properties)?;
        let data_extension = is_data_extension_like(object_type);
        message::check_object_names(&objects, data_extension)?;

        let objects: Vec<Map<String, Value>> = if data_extension {
            objects
                .into_iter()
                .map(message::split_data_extension_properties)
                .collect()
        } else {
            let editable = match self.get_editable_properties(object_type).await {
                Ok(editable) => editable,
                Err(err) => return err.into_failed_response(),
            };
            objects
                .into_iter()
                .map(|object| message::split_attributes(object, &editable))
                .collect()
        };

        debug!(%action, object_type, count = objects.len(), "Built objects message");
        let message = message::objects_message(object_type, objects, options);
        self.request(action, &message).await
    }

    /// Run `verb` against definitions of `object_type`.
    #[instrument(skip(self, properties))]
    pub async fn perform(
        &self,
        object_type: &str,
        properties: &Value,
        verb: &str,
    ) -> Result<SoapResponse> {
        let message = message::action_message(ActionKind::Definitions, object_type, properties, verb);
        self.request(SoapAction::Perform, &message).await
    }

    /// Apply `verb` to configurations of `object_type`.
    #[instrument(skip(self, properties))]
    pub async fn configure(
        &self,
        object_type: &str,
        properties: &Value,
        verb: &str,
    ) -> Result<SoapResponse> {
        let message =
            message::action_message(ActionKind::Configurations, object_type, properties, verb);
        self.request(SoapAction::Configure, &message).await
    }

    /// Subscribe `email` to every list in `list_ids`.
    ///
    /// Creates the subscriber; when it already exists the same properties are
    /// sent as an update instead.
    #[instrument(skip(self))]
    pub async fn add_subscriber_to_list(
        &mut self,
        email: &str,
        list_ids: &[&str],
        subscriber_key: Option<&str>,
    ) -> Result<SoapResponse> {
        let lists: Vec<Value> = list_ids.iter().map(|id| json!({ "ID": id })).collect();
        let mut subscriber = json!({ "EmailAddress": email, "Lists": lists });
        if let Some(key) = subscriber_key {
            subscriber["SubscriberKey"] = Value::String(key.to_string());
        }

        let rsp = self.post("Subscriber", &subscriber, None).await?;
        if first_error_code(&rsp).as_deref() == Some(SUBSCRIBER_EXISTS) {
            debug!(email, "Subscriber exists, updating");
            return self.patch("Subscriber", &subscriber, None).await;
        }
        Ok(rsp)
    }

    /// Create data extensions from loose definitions.
    ///
    /// Each definition may name its fields under `columns`, `fields` or an
    /// explicit `Fields.Field`, but only one of them.
    pub async fn create_data_extensions(&mut self, definitions: &Value) -> Result<SoapResponse> {
        DataExtension::new(definitions.clone()).post(self).await
    }
}

fn first_error_code(rsp: &SoapResponse) -> Option<String> {
    match rsp.results().first()?.get("error_code")? {
        Value::String(code) => Some(code.clone()),
        Value::Number(code) => Some(code.to_string()),
        _ => None,
    }
}
