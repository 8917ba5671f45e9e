//! SOAP envelope rendering.

use fuel_sdk_client::security::xml;
use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::types::{SoapAction, PARTNER_API_NS};
use crate::xml::write_children;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const WSSE_NS: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const PASSWORD_TEXT: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// Authentication header carrying the legacy token.
///
/// The username token is a placeholder the service requires alongside the
/// OAuth token.
pub fn header(internal_token: Option<&str>) -> Result<String> {
    let token = internal_token.filter(|t| !t.is_empty()).ok_or_else(|| {
        Error::new(ErrorKind::Config(
            "Require legacy token for soap header".to_string(),
        ))
    })?;

    Ok(format!(
        r#"<oAuth xmlns="http://exacttarget.com"><oAuthToken>{token}</oAuthToken></oAuth><wsse:Security xmlns:wsse="{wsse}" soapenv:mustUnderstand="1"><wsse:UsernameToken><wsse:Username>*</wsse:Username><wsse:Password Type="{password_type}">*</wsse:Password></wsse:UsernameToken></wsse:Security>"#,
        token = xml::escape(token),
        wsse = WSSE_NS,
        password_type = PASSWORD_TEXT,
    ))
}

/// Render a complete request envelope for `action`.
pub fn render(action: SoapAction, message: &Value, internal_token: Option<&str>) -> Result<String> {
    let header = header(internal_token)?;

    let mut body = String::new();
    write_children(&mut body, message)?;

    let element = action.request_element();
    Ok(format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="{soapenv}" xmlns:xsi="{xsi}" xmlns="{tns}" xmlns:tns="{tns}">
  <soapenv:Header>{header}</soapenv:Header>
  <soapenv:Body>
    <{element}>{body}</{element}>
  </soapenv:Body>
</soapenv:Envelope>"#,
        soapenv = SOAP_ENV_NS,
        xsi = XSI_NS,
        tns = PARTNER_API_NS,
    ))
}
