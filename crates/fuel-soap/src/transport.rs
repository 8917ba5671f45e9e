//! The SOAP transport seam.

use std::future::Future;
use std::sync::OnceLock;

use fuel_sdk_auth::{ClientCredentials, Credentials, EndpointResolver, StaticEndpoint};
use fuel_sdk_client::{FuelHttpClient, RawResponse};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::SoapConfig;
use crate::envelope;
use crate::error::Result;
use crate::types::SoapAction;

/// One network round trip to the SOAP endpoint.
///
/// Returns the raw HTTP outcome for any status. An error means no response
/// was obtained.
pub trait SoapTransport: Send + Sync {
    /// Send `message` as `action`.
    fn call(
        &self,
        action: SoapAction,
        message: &Value,
    ) -> impl Future<Output = Result<RawResponse>> + Send;
}

/// HTTP transport that renders envelopes and posts them with reqwest.
pub struct HttpSoapTransport<C: Credentials = ClientCredentials> {
    http: FuelHttpClient,
    credentials: C,
    endpoint: Box<dyn EndpointResolver>,
    resolved: OnceLock<String>,
    debug: bool,
}

impl<C: Credentials> std::fmt::Debug for HttpSoapTransport<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSoapTransport")
            .field("http", &self.http)
            .field("credentials", &"[REDACTED]")
            .field("endpoint", &self.resolved.get())
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl<C: Credentials> HttpSoapTransport<C> {
    /// Create a transport posting to the configured endpoint.
    pub fn new(credentials: C, config: &SoapConfig) -> Result<Self> {
        let endpoint = StaticEndpoint::new(config.endpoint.clone())?;
        Self::with_resolver(credentials, config, endpoint)
    }

    /// Create a transport whose endpoint is resolved on first use.
    pub fn with_resolver(
        credentials: C,
        config: &SoapConfig,
        resolver: impl EndpointResolver + 'static,
    ) -> Result<Self> {
        Ok(Self {
            http: FuelHttpClient::new(config.http.clone())?,
            credentials,
            endpoint: Box::new(resolver),
            resolved: OnceLock::new(),
            debug: config.debug,
        })
    }

    /// The credentials used for the SOAP header.
    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// Mutable access to the credentials, e.g. after a token refresh.
    pub fn credentials_mut(&mut self) -> &mut C {
        &mut self.credentials
    }

    /// The endpoint URL, resolved once and kept for the transport's lifetime.
    pub fn endpoint(&self) -> Result<&str> {
        if let Some(url) = self.resolved.get() {
            return Ok(url.as_str());
        }
        let url = self.endpoint.resolve()?;
        debug!(endpoint = %url, "Resolved SOAP endpoint");
        Ok(self.resolved.get_or_init(|| url).as_str())
    }
}

impl<C: Credentials> SoapTransport for HttpSoapTransport<C> {
    #[instrument(skip(self, message), fields(action = %action))]
    async fn call(&self, action: SoapAction, message: &Value) -> Result<RawResponse> {
        let envelope = envelope::render(action, message, self.credentials.internal_token())?;
        let url = self.endpoint()?;

        if self.debug {
            debug!(%envelope, "SOAP request");
        }

        let raw = self
            .http
            .post_soap(url, action.soap_action(), envelope)
            .await?;

        if self.debug {
            debug!(status = raw.status, body = %raw.body, "SOAP response");
        }

        Ok(raw)
    }
}
