//! # fuel-client
//!
//! Core HTTP client infrastructure for the Marketing Cloud SOAP API.
//!
//! This crate provides the foundational HTTP layer with:
//! - Request/connect timeouts tuned for the slow SOAP endpoint
//! - A single-retry policy for transport-level failures
//! - Request/response tracing
//! - XML escaping for hand-built envelopes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (fuel-soap: message builder, invoker, unpacker)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    FuelHttpClient                           │
//! │  - Raw HTTP POST of SOAP envelopes                          │
//! │  - Returns status + body for every HTTP status              │
//! │  - Maps connectivity failures to transport errors           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fuel_sdk_client::{ClientConfig, FuelHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fuel_sdk_client::Error> {
//!     let client = FuelHttpClient::new(ClientConfig::default())?;
//!     let raw = client
//!         .post_soap("https://webservice.exacttarget.com/Service.asmx", "Retrieve", envelope)
//!         .await?;
//!     println!("{} {}", raw.status, raw.body);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod retry;
pub mod security;

pub use client::{FuelHttpClient, RawResponse};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use retry::{RetryConfig, RetryPolicy};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("fuel-sdk/", env!("CARGO_PKG_VERSION"));
