//! # fuel-sdk
//!
//! A Marketing Cloud SOAP API client library for Rust.
//!
//! This library turns loose object descriptions into the envelopes the
//! partner API expects and normalizes whatever comes back.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, app signature) are redacted in Debug output
//! - Tracing skips credential values
//! - Error messages never include credential data
//!
//! ## Crates
//!
//! - **fuel-sdk-client** - HTTP transport with timeouts and the single-retry policy
//! - **fuel-sdk-auth** - Credentials, app JWT decoding, endpoint resolution
//! - **fuel-sdk-soap** - Describe cache, message builder, invoker, response unpacker
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fuel_sdk::soap::objects::{Readable, Subscriber};
//! use fuel_sdk::SoapClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     fuel_sdk::init_tracing();
//!
//!     // FUEL_CLIENT_ID, FUEL_CLIENT_SECRET, FUEL_INTERNAL_TOKEN, ...
//!     let mut client = SoapClient::from_env()?;
//!
//!     let rsp = Subscriber::new(json!(["EmailAddress", "Status"]))
//!         .get(&mut client)
//!         .await?;
//!
//!     for row in rsp.results() {
//!         println!("{}", row["email_address"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use fuel_sdk_auth as auth;
#[cfg(feature = "client")]
pub use fuel_sdk_client as client;
#[cfg(feature = "soap")]
pub use fuel_sdk_soap as soap;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use fuel_sdk_auth::{ClientCredentials, Credentials};
#[cfg(feature = "client")]
pub use fuel_sdk_client::{ClientConfig, RetryConfig};
#[cfg(feature = "soap")]
pub use fuel_sdk_soap::{Filter, SoapClient, SoapConfig, SoapResponse};

/// Install a `tracing` subscriber filtered by `RUST_LOG`, defaulting to `info`.
///
/// Does nothing when a global subscriber is already set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
