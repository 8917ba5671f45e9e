//! Security utilities for SOAP API operations.
//!
//! Any caller-controlled value interpolated into a hand-built envelope MUST be
//! escaped with [`xml::escape`] so it cannot break out of its element.
//!
//! ```rust
//! use fuel_sdk_client::security::xml;
//!
//! // CORRECT
//! let token = xml::escape("abc<def>");
//! let header = format!("<oAuthToken>{}</oAuthToken>", token);
//!
//! // WRONG - NEVER do this with untrusted input
//! // let header = format!("<oAuthToken>{}</oAuthToken>", raw_token);
//! ```

/// XML escaping utilities for SOAP envelopes.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fuel_sdk_client::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}
