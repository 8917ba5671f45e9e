//! SOAP API client.
//!
//! Every operation is a single sequential call through the transport, with
//! one retry when no response was obtained. Operations that may populate the
//! metadata cache take `&mut self`; the cache is plain per-client state.

use fuel_sdk_auth::{ClientCredentials, Credentials, EndpointResolver};
use fuel_sdk_client::{RawResponse, RetryConfig, RetryPolicy};
use serde_json::Value;
use tracing::warn;

use crate::cache::MetadataCache;
use crate::config::SoapConfig;
use crate::error::Result;
use crate::response::SoapResponse;
use crate::transport::{HttpSoapTransport, SoapTransport};
use crate::types::SoapAction;

mod crud;
mod describe;
mod retrieve;

/// Marketing Cloud SOAP API client.
#[derive(Debug)]
pub struct SoapClient<T: SoapTransport = HttpSoapTransport> {
    transport: T,
    cache: MetadataCache,
    retry: RetryConfig,
}

impl<C: Credentials> SoapClient<HttpSoapTransport<C>> {
    /// Create a client posting to the configured endpoint.
    pub fn new(credentials: C, config: SoapConfig) -> Result<Self> {
        let transport = HttpSoapTransport::new(credentials, &config)?;
        Ok(Self::with_transport(transport, config.retry().clone()))
    }

    /// Create a client whose endpoint is resolved on first use.
    pub fn with_resolver(
        credentials: C,
        config: SoapConfig,
        resolver: impl EndpointResolver + 'static,
    ) -> Result<Self> {
        let transport = HttpSoapTransport::with_resolver(credentials, &config, resolver)?;
        Ok(Self::with_transport(transport, config.retry().clone()))
    }
}

impl SoapClient<HttpSoapTransport<ClientCredentials>> {
    /// Create a client from `FUEL_*` environment variables and default settings.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientCredentials::from_env()?, SoapConfig::default())
    }
}

impl<T: SoapTransport> SoapClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(transport: T, retry: RetryConfig) -> Self {
        Self {
            transport,
            cache: MetadataCache::new(),
            retry,
        }
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The metadata cache.
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Mutable access to the metadata cache, e.g. to seed known property sets.
    pub fn cache_mut(&mut self) -> &mut MetadataCache {
        &mut self.cache
    }

    /// Call the transport, retrying once when no response was obtained.
    ///
    /// The last transport error propagates unchanged once retries are spent.
    pub(crate) async fn invoke(&self, action: SoapAction, message: &Value) -> Result<RawResponse> {
        let mut policy = RetryPolicy::new(self.retry.clone());

        loop {
            let err = match self.transport.call(action, message).await {
                Ok(raw) => return Ok(raw),
                Err(err) if err.is_retryable() => err,
                Err(err) => return Err(err),
            };

            let Some(delay) = policy.next_delay() else {
                return Err(err);
            };

            warn!(
                action = %action,
                attempt = policy.attempt(),
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "SOAP call failed, retrying"
            );

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    /// Invoke and unpack with the generic unpacker.
    pub(crate) async fn request(&self, action: SoapAction, message: &Value) -> Result<SoapResponse> {
        let raw = self.invoke(action, message).await?;
        Ok(SoapResponse::unpack(action, raw))
    }
}
