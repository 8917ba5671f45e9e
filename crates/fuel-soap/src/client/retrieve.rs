use serde_json::Value;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::filter::normalize_filter;
use crate::message;
use crate::response::SoapResponse;
use crate::transport::SoapTransport;
use crate::types::{data_extension_name, SoapAction};

impl<T: SoapTransport> super::SoapClient<T> {
    /// Retrieve objects of `object_type`.
    ///
    /// `properties` may be a list of names, one name, or a map whose keys are
    /// used. When absent or empty the full retrievable set is requested; for
    /// `DataExtensionObject[<name>]` that is the field list of the extension
    /// with that name, found through its customer key.
    ///
    /// A failed property lookup is returned as the (failed) response.
    #[instrument(skip(self, properties, filter))]
    pub async fn get(
        &mut self,
        object_type: &str,
        properties: Option<&Value>,
        filter: Option<&Value>,
    ) -> Result<SoapResponse> {
        let requested = message::normalize_retrieve_properties(properties)?;
        let filter = normalize_filter(filter, object_type)?;

        let properties = match requested {
            Some(properties) => properties,
            None => {
                let resolved = match data_extension_name(object_type) {
                    Some(name) => self.get_data_extension_fields_by_name(name).await,
                    None => self.get_retrievable_properties(object_type).await,
                };
                match resolved {
                    Ok(properties) => properties,
                    Err(err) => return err.into_failed_response(),
                }
            }
        };

        let message = message::retrieve_message(object_type, &properties, filter);
        self.request(SoapAction::Retrieve, &message).await
    }

    /// Fetch the next page of a retrieve.
    ///
    /// Returns `None`, without any network call, when `previous` has no more
    /// data. Rows are never merged; callers accumulate pages themselves.
    #[instrument(skip_all)]
    pub async fn continue_retrieve(&self, previous: &SoapResponse) -> Result<Option<SoapResponse>> {
        if !previous.more() {
            info!("No more data");
            return Ok(None);
        }

        let request_id = previous
            .request_id()
            .ok_or_else(|| Error::malformed("Cannot continue a retrieve without a request id"))?;

        let message = message::continue_message(request_id);
        self.request(SoapAction::Retrieve, &message).await.map(Some)
    }
}
