//! SAML 2.0 constants and URIs.
//!
//! Every identifier the configuration layer emits is a closed enum: a value
//! can only be one of the listed SAML constants, and parsing rejects
//! anything else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// SAML 2.0 metadata namespace URI.
pub const MD_NS: &str = "urn:oasis:names:tc:SAML:2.0:metadata";

/// SAML 2.0 assertion namespace URI.
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

/// SAML 2.0 protocol namespace URI.
pub const SAMLP_NS: &str = "urn:oasis:names:tc:SAML:2.0:protocol";

/// XML Digital Signature namespace URI.
pub const XMLDSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// Implements the string conversions shared by all closed constant sets.
macro_rules! saml_constant {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
            }
        }

        impl TryFrom<String> for $ty {
            type Error = ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }
    };
}

// ============================================================================
// Binding URIs
// ============================================================================

/// SAML bindings used by the service provider endpoints.
///
/// Only the bindings the supported subset uses are representable: SSO and
/// SLO go over HTTP-Redirect, the assertion consumer service over HTTP-POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum SamlBinding {
    /// HTTP POST binding.
    HttpPost,
    /// HTTP Redirect binding.
    HttpRedirect,
}

impl SamlBinding {
    /// Returns the URI for this binding.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::HttpPost => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST",
            Self::HttpRedirect => "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect",
        }
    }

    /// Parses a binding from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST" => Some(Self::HttpPost),
            "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect" => Some(Self::HttpRedirect),
            _ => None,
        }
    }

    /// Returns the HTTP method the user agent uses for this binding.
    #[must_use]
    pub const fn http_method(&self) -> &'static str {
        match self {
            Self::HttpPost => "POST",
            Self::HttpRedirect => "GET",
        }
    }

    const fn as_str(self) -> &'static str {
        self.uri()
    }

    fn parse(s: &str) -> Option<Self> {
        Self::from_uri(s)
    }
}

saml_constant!(SamlBinding);

// ============================================================================
// Name ID Formats
// ============================================================================

/// SAML Name ID formats.
///
/// Defaults to [`NameIdFormat::EmailAddress`], the format a service
/// provider requests unless configured otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum NameIdFormat {
    /// Unspecified name ID format.
    Unspecified,
    /// Email address format.
    #[default]
    EmailAddress,
    /// X.509 subject name format.
    X509SubjectName,
    /// Windows domain qualified name format.
    WindowsDomainQualifiedName,
    /// Kerberos principal name format.
    Kerberos,
    /// Entity identifier format.
    Entity,
    /// Transient identifier format.
    Transient,
    /// Persistent identifier format.
    Persistent,
    /// Encrypted identifier format.
    Encrypted,
}

impl NameIdFormat {
    /// All name ID formats, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Unspecified,
        Self::EmailAddress,
        Self::X509SubjectName,
        Self::WindowsDomainQualifiedName,
        Self::Kerberos,
        Self::Entity,
        Self::Transient,
        Self::Persistent,
        Self::Encrypted,
    ];

    /// Returns the URI for this name ID format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:1.1:nameid-format:unspecified",
            Self::EmailAddress => "urn:oasis:names:tc:SAML:1.1:nameid-format:emailAddress",
            Self::X509SubjectName => "urn:oasis:names:tc:SAML:1.1:nameid-format:X509SubjectName",
            Self::WindowsDomainQualifiedName => {
                "urn:oasis:names:tc:SAML:1.1:nameid-format:WindowsDomainQualifiedName"
            }
            Self::Kerberos => "urn:oasis:names:tc:SAML:2.0:nameid-format:kerberos",
            Self::Entity => "urn:oasis:names:tc:SAML:2.0:nameid-format:entity",
            Self::Transient => "urn:oasis:names:tc:SAML:2.0:nameid-format:transient",
            Self::Persistent => "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent",
            Self::Encrypted => "urn:oasis:names:tc:SAML:2.0:nameid-format:encrypted",
        }
    }

    /// Parses a name ID format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.uri() == uri)
    }

    const fn as_str(self) -> &'static str {
        self.uri()
    }

    fn parse(s: &str) -> Option<Self> {
        Self::from_uri(s)
    }
}

saml_constant!(NameIdFormat);

// ============================================================================
// Attribute Name Formats
// ============================================================================

/// Name formats for requested attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AttributeNameFormat {
    /// Interpretation is left to the IdP.
    Unspecified,
    /// The attribute name is a URI (e.g. `urn:oid:...`).
    Uri,
    /// The attribute name is a simple string.
    Basic,
}

impl AttributeNameFormat {
    /// Returns the URI for this attribute name format.
    #[must_use]
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::Unspecified => "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified",
            Self::Uri => "urn:oasis:names:tc:SAML:2.0:attrname-format:uri",
            Self::Basic => "urn:oasis:names:tc:SAML:2.0:attrname-format:basic",
        }
    }

    /// Parses an attribute name format from its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri {
            "urn:oasis:names:tc:SAML:2.0:attrname-format:unspecified" => Some(Self::Unspecified),
            "urn:oasis:names:tc:SAML:2.0:attrname-format:uri" => Some(Self::Uri),
            "urn:oasis:names:tc:SAML:2.0:attrname-format:basic" => Some(Self::Basic),
            _ => None,
        }
    }

    const fn as_str(self) -> &'static str {
        self.uri()
    }

    fn parse(s: &str) -> Option<Self> {
        Self::from_uri(s)
    }
}

saml_constant!(AttributeNameFormat);

// ============================================================================
// Contact Types
// ============================================================================

/// Metadata contact person types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ContactType {
    /// Technical contact.
    Technical,
    /// Support contact.
    Support,
    /// Administrative contact.
    Administrative,
    /// Billing contact.
    Billing,
    /// Any other contact.
    Other,
}

impl ContactType {
    /// Returns the `contactType` attribute value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Support => "support",
            Self::Administrative => "administrative",
            Self::Billing => "billing",
            Self::Other => "other",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "technical" => Some(Self::Technical),
            "support" => Some(Self::Support),
            "administrative" => Some(Self::Administrative),
            "billing" => Some(Self::Billing),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

saml_constant!(ContactType);
