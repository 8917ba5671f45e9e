//! Signed app JWT decoding.
//!
//! An installed app receives a JWT signed with its app signature. The
//! payload carries the user's tokens under `request.user`.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, ErrorKind, Result};

/// Tokens extracted from a decoded app JWT.
#[derive(Clone)]
pub struct AppJwt {
    /// OAuth access token.
    pub oauth_token: String,
    /// Legacy/internal token used for the SOAP header.
    pub internal_oauth_token: String,
    /// Refresh token, when the app was granted offline access.
    pub refresh_token: Option<String>,
    /// Seconds until the access token expires.
    pub expires_in: Option<i64>,
    /// The full decoded claims.
    pub claims: Value,
}

impl std::fmt::Debug for AppJwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppJwt")
            .field("oauth_token", &"[REDACTED]")
            .field("internal_oauth_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

impl AppJwt {
    /// Decode and verify an HS256 app JWT with the app signature.
    pub fn decode(encoded: &str, signature: &str) -> Result<Self> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Value>(
            encoded,
            &DecodingKey::from_secret(signature.as_bytes()),
            &validation,
        )?;

        debug!("Decoded app JWT");
        Self::from_claims(data.claims)
    }

    /// Extract the tokens from already-decoded claims.
    pub fn from_claims(claims: Value) -> Result<Self> {
        let user = claims
            .get("request")
            .and_then(|r| r.get("user"))
            .ok_or_else(|| {
                Error::new(ErrorKind::TokenInvalid(
                    "Missing request.user in JWT payload".to_string(),
                ))
            })?;

        let oauth_token = required_token(user, "oauthToken")?;
        let internal_oauth_token = required_token(user, "internalOauthToken")?;
        let refresh_token = user.get("refreshToken").and_then(token_string);
        let expires_in = user.get("expiresIn").and_then(Value::as_i64);

        Ok(Self {
            oauth_token,
            internal_oauth_token,
            refresh_token,
            expires_in,
            claims,
        })
    }
}

fn required_token(user: &Value, key: &str) -> Result<String> {
    user.get(key).and_then(token_string).ok_or_else(|| {
        Error::new(ErrorKind::TokenInvalid(format!(
            "Missing {} in JWT payload",
            key
        )))
    })
}

/// Tokens may be issued as strings or bare numbers.
fn token_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
