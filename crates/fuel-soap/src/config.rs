//! SOAP client configuration.

use fuel_sdk_auth::{DEFAULT_SOAP_ENDPOINT, DEFAULT_WSDL};
use fuel_sdk_client::{ClientConfig, RetryConfig};

/// Configuration for a [`SoapClient`](crate::SoapClient).
#[derive(Debug, Clone)]
pub struct SoapConfig {
    /// WSDL location describing the partner API.
    pub wsdl: String,
    /// SOAP service URL used when no resolver is supplied.
    pub endpoint: String,
    /// Log full request and response envelopes at debug level.
    pub debug: bool,
    /// HTTP settings, including the retry policy of the invoker.
    pub http: ClientConfig,
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self {
            wsdl: DEFAULT_WSDL.to_string(),
            endpoint: DEFAULT_SOAP_ENDPOINT.to_string(),
            debug: false,
            http: ClientConfig::default(),
        }
    }
}

impl SoapConfig {
    /// Create a new SOAP config builder.
    pub fn builder() -> SoapConfigBuilder {
        SoapConfigBuilder::default()
    }

    /// Retry policy applied to each SOAP call.
    pub fn retry(&self) -> &RetryConfig {
        &self.http.retry
    }
}

/// Builder for SoapConfig.
#[derive(Debug, Default)]
pub struct SoapConfigBuilder {
    config: SoapConfig,
}

impl SoapConfigBuilder {
    /// Set the WSDL location.
    pub fn with_wsdl(mut self, wsdl: impl Into<String>) -> Self {
        self.config.wsdl = wsdl.into();
        self
    }

    /// Set the SOAP endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Enable or disable envelope logging.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.http.retry = retry;
        self
    }

    /// Replace the HTTP settings.
    pub fn with_http_config(mut self, http: ClientConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Build the SOAP configuration.
    pub fn build(self) -> SoapConfig {
        self.config
    }
}
