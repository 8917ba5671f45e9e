//! Error types for fuel-soap.
//!
//! Only configuration errors, exhausted transport failures and malformed
//! caller input surface as errors. A well-formed response whose `success` is
//! false is returned as a [`SoapResponse`], never raised.

use crate::response::SoapResponse;

/// Result type alias for fuel-soap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for fuel-soap operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Shorthand for a malformed-input error.
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedInput(message.into()))
    }

    /// Schema discovery failed for `object_type`.
    ///
    /// The carried response gets its message set here, at construction.
    pub(crate) fn describe_failed(object_type: &str, response: SoapResponse) -> Self {
        let response = response.with_message(format!("Unable to get {}", object_type));
        Self::new(ErrorKind::DescribeFailed {
            object_type: object_type.to_string(),
            response: Box::new(response),
        })
    }

    /// Returns true if the call may be attempted once more.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }

    /// Returns true if this error was caused by missing or invalid configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Config(_))
    }

    /// The failed response carried by a describe failure, if any.
    pub fn failed_response(&self) -> Option<&SoapResponse> {
        match &self.kind {
            ErrorKind::DescribeFailed { response, .. } => Some(&**response),
            _ => None,
        }
    }

    /// Turn a describe failure into its failed response; keep anything else as an error.
    pub fn into_failed_response(self) -> std::result::Result<SoapResponse, Error> {
        match self.kind {
            ErrorKind::DescribeFailed { response, .. } => Ok(*response),
            kind => Err(Error {
                kind,
                source: self.source,
            }),
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Missing credentials, token or endpoint. Never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Describe did not report success.
    #[error("Unable to get {object_type}")]
    DescribeFailed {
        object_type: String,
        response: Box<SoapResponse>,
    },

    /// No response was obtained from the service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Properties or filters that cannot be turned into a message.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Credential handling failed.
    #[error("Auth error: {0}")]
    Auth(String),

    /// A lookup that must match exactly one record did not.
    #[error("Not found: {0}")]
    NotFound(String),

    /// XML could not be parsed.
    #[error("XML error: {0}")]
    Xml(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<fuel_sdk_client::Error> for Error {
    fn from(err: fuel_sdk_client::Error) -> Self {
        let kind = if err.is_config_error() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };
        Error::with_source(kind, err)
    }
}

impl From<fuel_sdk_auth::Error> for Error {
    fn from(err: fuel_sdk_auth::Error) -> Self {
        let kind = if err.is_config_error() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Auth(err.to_string())
        };
        Error::with_source(kind, err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}
