//! # fuel-auth
//!
//! Credential and session capabilities for the Marketing Cloud SOAP API.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets, app signature) are redacted in Debug output
//! - Tracing skips credential values
//! - Error messages never include credential data
//!
//! ## What lives here
//!
//! - **Credentials** - the legacy/internal token used in the SOAP `oAuth` header
//! - **App JWT** - decoding the signed JWT posted to an installed app
//! - **Token request** - the payload for the token exchange (performed elsewhere)
//! - **Endpoint resolution** - the SOAP service URL, resolved once per client
//!
//! ## Example
//!
//! ```rust,ignore
//! use fuel_sdk_auth::{ClientCredentials, Credentials};
//!
//! let creds = ClientCredentials::new("client-id", "client-secret")
//!     .with_signature("app-signature")
//!     .with_jwt(&encoded_jwt)?;
//!
//! assert!(creds.internal_token().is_some());
//! ```

mod credentials;
mod endpoint;
mod error;
mod jwt;

pub use credentials::{ClientCredentials, Credentials};
pub use endpoint::{EndpointResolver, StaticEndpoint};
pub use error::{Error, ErrorKind, Result};
pub use jwt::AppJwt;

/// Default SOAP service endpoint.
pub const DEFAULT_SOAP_ENDPOINT: &str = "https://webservice.exacttarget.com/Service.asmx";

/// Default WSDL location.
pub const DEFAULT_WSDL: &str = "https://webservice.exacttarget.com/etframework.wsdl";
