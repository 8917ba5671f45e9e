//! # fuel-soap
//!
//! Marketing Cloud SOAP API client: the translation layer between loose
//! object descriptions and the envelopes the partner API expects.
//!
//! ## Features
//!
//! - **Retrieve** - Property resolution through describe, filters, continuation
//! - **Create / Update / Delete / Upsert** - Attribute and data-extension property encoding
//! - **Perform / Configure** - Action messages over definitions and configurations
//! - **Describe** - Seven property classes per object type, cached per client
//! - **Single retry** - One more attempt when no response was obtained
//!
//! ## Example
//!
//! ```rust,ignore
//! use fuel_sdk_auth::ClientCredentials;
//! use fuel_sdk_soap::{Filter, SoapClient, SoapConfig};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fuel_sdk_soap::Error> {
//!     let creds = ClientCredentials::new("client-id", "client-secret")
//!         .with_internal_token("legacy-token");
//!     let mut client = SoapClient::new(creds, SoapConfig::default())?;
//!
//!     // Every retrievable property of active subscribers
//!     let filter = Filter::equals("Status", "Active").into();
//!     let mut page = client.get("Subscriber", None, Some(&filter)).await?;
//!     let mut rows = page.results().to_vec();
//!     while let Some(next) = client.continue_retrieve(&page).await? {
//!         rows.extend_from_slice(next.results());
//!         page = next;
//!     }
//!
//!     // Editable custom attributes are sent as Attributes
//!     let rsp = client
//!         .post("Subscriber", &json!({"EmailAddress": "a@b.com", "FirstName": "Dev"}), None)
//!         .await?;
//!     println!("{:?} {:?}", rsp.success(), rsp.message());
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod client;
mod config;
mod envelope;
mod error;
mod filter;
pub mod message;
pub mod objects;
mod response;
mod transport;
mod types;
mod xml;

#[cfg(test)]
mod testing;

pub use cache::{CacheBucket, MetadataCache};
pub use client::SoapClient;
pub use config::{SoapConfig, SoapConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use filter::{normalize_filter, Filter, LogicalOperator, SimpleFilter, SimpleOperator};
pub use response::{DescribeResponse, SoapResponse};
pub use transport::{HttpSoapTransport, SoapTransport};
pub use types::{
    data_extension_name, is_data_extension_like, SoapAction, COMPLEX_FILTER_PART, PARTNER_API_NS,
    SIMPLE_FILTER_PART,
};
