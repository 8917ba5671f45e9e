//! Core HTTP client for posting SOAP envelopes.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};

/// Raw HTTP outcome of one SOAP round trip.
///
/// Any HTTP status yields a `RawResponse`; SOAP faults are delivered with
/// status 500 and still carry a parseable envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Create a raw response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client for the SOAP API with timeouts and tracing.
#[derive(Debug, Clone)]
pub struct FuelHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl FuelHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// POST a SOAP envelope once, without retry.
    ///
    /// Returns an error only when no response was obtained at all.
    #[instrument(skip(self, envelope), fields(soap_action = %soap_action))]
    pub async fn post_soap(
        &self,
        url: &str,
        soap_action: &str,
        envelope: String,
    ) -> Result<RawResponse> {
        let url = url::Url::parse(url)?;

        if self.config.enable_tracing {
            debug!(url = %url, bytes = envelope.len(), "Sending SOAP request");
        }

        let response = self
            .inner
            .post(url)
            .header("Content-Type", "text/xml;charset=UTF-8")
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if self.config.enable_tracing {
            if (200..300).contains(&status) {
                debug!(status, bytes = body.len(), "Response received");
            } else {
                info!(status, bytes = body.len(), "Non-success response");
            }
        }

        Ok(RawResponse { status, body })
    }
}
