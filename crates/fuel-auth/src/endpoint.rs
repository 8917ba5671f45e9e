//! SOAP endpoint resolution.

use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_SOAP_ENDPOINT;

/// Resolves the SOAP service URL for a client.
///
/// Resolution happens at most once per client; implementations may be
/// expensive.
pub trait EndpointResolver: Send + Sync {
    /// Return the absolute SOAP service URL.
    fn resolve(&self) -> Result<String>;
}

/// A fixed, pre-validated endpoint.
#[derive(Debug, Clone)]
pub struct StaticEndpoint {
    url: String,
}

impl StaticEndpoint {
    /// Create a static endpoint, validating the URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let parsed = url::Url::parse(&url)?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(Error::new(ErrorKind::InvalidEndpoint(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            ))));
        }
        Ok(Self { url })
    }

    /// The endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for StaticEndpoint {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOAP_ENDPOINT.to_string(),
        }
    }
}

impl EndpointResolver for StaticEndpoint {
    fn resolve(&self) -> Result<String> {
        Ok(self.url.clone())
    }
}

impl<F> EndpointResolver for F
where
    F: Fn() -> Result<String> + Send + Sync,
{
    fn resolve(&self) -> Result<String> {
        self()
    }
}
