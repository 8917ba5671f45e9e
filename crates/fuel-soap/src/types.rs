//! SOAP actions and object-type naming rules.

use std::fmt;

/// Namespace of the partner API schema.
pub const PARTNER_API_NS: &str = "http://exacttarget.com/wsdl/partnerAPI";

/// Discriminator for a simple filter part.
pub const SIMPLE_FILTER_PART: &str = "tns:SimpleFilterPart";

/// Discriminator for a complex filter part.
pub const COMPLEX_FILTER_PART: &str = "tns:ComplexFilterPart";

/// Key under which a wire message carries an element's schema type.
pub const XSI_TYPE: &str = "@xsi:type";

/// One of the SOAP operations the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoapAction {
    Retrieve,
    Create,
    Update,
    Delete,
    Perform,
    Configure,
    Describe,
}

impl SoapAction {
    /// Value of the `SOAPAction` HTTP header.
    pub fn soap_action(&self) -> &'static str {
        match self {
            Self::Retrieve => "Retrieve",
            Self::Create => "Create",
            Self::Update => "Update",
            Self::Delete => "Delete",
            Self::Perform => "Perform",
            Self::Configure => "Configure",
            Self::Describe => "Describe",
        }
    }

    /// Element wrapping the message inside the SOAP body.
    pub fn request_element(&self) -> &'static str {
        match self {
            Self::Retrieve => "RetrieveRequestMsg",
            Self::Create => "CreateRequest",
            Self::Update => "UpdateRequest",
            Self::Delete => "DeleteRequest",
            Self::Perform => "PerformRequestMsg",
            Self::Configure => "ConfigureRequestMsg",
            Self::Describe => "DefinitionRequestMsg",
        }
    }

    /// Key of the response wrapper inside the parsed body.
    pub fn response_wrapper(&self) -> &'static str {
        match self {
            Self::Retrieve => "retrieve_response_msg",
            Self::Create => "create_response",
            Self::Update => "update_response",
            Self::Delete => "delete_response",
            Self::Perform => "perform_response_msg",
            Self::Configure => "configure_response_msg",
            Self::Describe => "definition_response_msg",
        }
    }
}

impl fmt::Display for SoapAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.soap_action())
    }
}

/// Returns true for data-extension-like object types.
///
/// These are `DataExtensionObject`, `DataExtensionField` and friends. The
/// `DataExtension` definition object itself is a regular type.
pub fn is_data_extension_like(object_type: &str) -> bool {
    object_type.starts_with("DataExtension") && object_type != "DataExtension"
}

/// Extension name of a `DataExtensionObject[<name>]` object type.
///
/// ```rust
/// use fuel_sdk_soap::data_extension_name;
///
/// assert_eq!(data_extension_name("DataExtensionObject[Members]"), Some("Members"));
/// assert_eq!(data_extension_name("DataExtensionObject"), None);
/// ```
pub fn data_extension_name(object_type: &str) -> Option<&str> {
    object_type
        .strip_prefix("DataExtensionObject[")?
        .strip_suffix(']')
        .filter(|name| !name.is_empty())
}
