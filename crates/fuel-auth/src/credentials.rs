//! Credentials trait and implementations.
//!
//! All credential types implement custom Debug to redact sensitive data.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::jwt::AppJwt;

/// Trait for anything that can supply the SOAP header token.
pub trait Credentials: Send + Sync {
    /// The legacy/internal token placed in the SOAP `oAuth` header.
    fn internal_token(&self) -> Option<&str>;

    /// Returns true if a non-empty internal token is available.
    fn has_internal_token(&self) -> bool {
        self.internal_token().is_some_and(|t| !t.is_empty())
    }
}

/// Marketing Cloud client credentials and session tokens.
///
/// Secrets and tokens are redacted in Debug output to prevent accidental
/// exposure in logs.
#[derive(Clone, Default)]
pub struct ClientCredentials {
    client_id: Option<String>,
    client_secret: Option<String>,
    signature: Option<String>,
    auth_token: Option<String>,
    internal_token: Option<String>,
    refresh_token: Option<String>,
    auth_token_expiration: Option<DateTime<Utc>>,
    decoded_jwt: Option<Value>,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact(&self.client_secret))
            .field("signature", &redact(&self.signature))
            .field("auth_token", &redact(&self.auth_token))
            .field("internal_token", &redact(&self.internal_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("auth_token_expiration", &self.auth_token_expiration)
            .finish_non_exhaustive()
    }
}

impl ClientCredentials {
    /// Create credentials for an installed package's client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(client_secret.into()),
            ..Default::default()
        }
    }

    /// Set the app signature used to verify app JWTs.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Set the legacy/internal token directly.
    pub fn with_internal_token(mut self, token: impl Into<String>) -> Self {
        self.internal_token = Some(token.into());
        self
    }

    /// Set the refresh token.
    pub fn with_refresh_token(mut self, token: impl Into<String>) -> Self {
        self.refresh_token = Some(token.into());
        self
    }

    /// Set the OAuth access token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Decode an app JWT with the app signature and adopt its tokens.
    pub fn with_jwt(mut self, encoded: &str) -> Result<Self> {
        self.set_jwt(encoded)?;
        Ok(self)
    }

    /// Decode an app JWT with the app signature and adopt its tokens.
    pub fn set_jwt(&mut self, encoded: &str) -> Result<()> {
        let signature = self.signature.as_deref().ok_or_else(|| {
            Error::new(ErrorKind::Config(
                "Require app signature to decode JWT".to_string(),
            ))
        })?;
        let jwt = AppJwt::decode(encoded, signature)?;
        self.apply_jwt(jwt);
        Ok(())
    }

    /// Adopt the tokens carried by a decoded app JWT.
    pub fn apply_jwt(&mut self, jwt: AppJwt) {
        self.auth_token = Some(jwt.oauth_token);
        self.internal_token = Some(jwt.internal_oauth_token);
        self.refresh_token = jwt.refresh_token;
        self.auth_token_expiration = jwt
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        self.decoded_jwt = Some(jwt.claims);
        debug!("Adopted tokens from app JWT");
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `FUEL_CLIENT_ID`
    /// - `FUEL_CLIENT_SECRET`
    ///
    /// Optional:
    /// - `FUEL_APP_SIGNATURE`
    /// - `FUEL_INTERNAL_TOKEN`
    /// - `FUEL_REFRESH_TOKEN`
    pub fn from_env() -> Result<Self> {
        let client_id = std::env::var("FUEL_CLIENT_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("FUEL_CLIENT_ID".to_string())))?;
        let client_secret = std::env::var("FUEL_CLIENT_SECRET")
            .map_err(|_| Error::new(ErrorKind::EnvVar("FUEL_CLIENT_SECRET".to_string())))?;

        let mut creds = Self::new(client_id, client_secret);
        if let Ok(signature) = std::env::var("FUEL_APP_SIGNATURE") {
            creds = creds.with_signature(signature);
        }
        if let Ok(token) = std::env::var("FUEL_INTERNAL_TOKEN") {
            creds = creds.with_internal_token(token);
        }
        if let Ok(token) = std::env::var("FUEL_REFRESH_TOKEN") {
            creds = creds.with_refresh_token(token);
        }

        Ok(creds)
    }

    /// Build the JSON body for a token request.
    ///
    /// The exchange itself happens outside this crate.
    pub fn token_request(&self) -> Result<Value> {
        let (Some(id), Some(secret)) = (&self.client_id, &self.client_secret) else {
            return Err(Error::new(ErrorKind::Config(
                "Require Client Id and Client Secret to refresh tokens".to_string(),
            )));
        };

        let mut body = json!({
            "clientId": id,
            "clientSecret": secret,
            "accessType": "offline",
        });
        if let Some(refresh) = &self.refresh_token {
            body["refreshToken"] = Value::String(refresh.clone());
        }
        Ok(body)
    }

    /// Adopt the tokens from a token-exchange response body.
    pub fn apply_token_response(&mut self, response: &Value) -> Result<()> {
        let Some(access) = response.get("accessToken").and_then(Value::as_str) else {
            let message = response
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(Error::new(ErrorKind::TokenInvalid(format!(
                "Unable to refresh token: {}",
                message
            ))));
        };

        self.auth_token = Some(access.to_string());
        self.internal_token = response
            .get("legacyToken")
            .and_then(Value::as_str)
            .map(String::from);
        if let Some(refresh) = response.get("refreshToken").and_then(Value::as_str) {
            self.refresh_token = Some(refresh.to_string());
        }
        if let Some(secs) = response.get("expiresIn").and_then(Value::as_i64) {
            self.auth_token_expiration = Some(Utc::now() + Duration::seconds(secs));
        }
        Ok(())
    }

    /// Returns true if a token exchange is needed.
    pub fn needs_refresh(&self) -> bool {
        match (&self.auth_token, self.auth_token_expiration) {
            (None, _) => true,
            (Some(_), Some(expires)) => expires <= Utc::now(),
            (Some(_), None) => false,
        }
    }

    /// Client id, if configured.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// OAuth access token, if any.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Refresh token, if any.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// When the access token expires, if known.
    pub fn auth_token_expiration(&self) -> Option<DateTime<Utc>> {
        self.auth_token_expiration
    }

    /// Claims of the last decoded app JWT.
    pub fn decoded_jwt(&self) -> Option<&Value> {
        self.decoded_jwt.as_ref()
    }
}

impl Credentials for ClientCredentials {
    fn internal_token(&self) -> Option<&str> {
        self.internal_token.as_deref()
    }
}
