//! The settings document consumed by the SAML engine.
//!
//! Field order and names follow the engine's settings schema, so two
//! serializations of the same configuration are byte-identical.

use serde::{Deserialize, Serialize};

use crate::types::{AttributeNameFormat, NameIdFormat, SamlBinding};

/// Root of the engine settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Reject messages that do not strictly follow the SAML standard.
    pub strict: bool,
    /// Let the engine report extra diagnostics.
    pub debug: bool,
    /// Always `null`; the engine must not guess the base URL.
    pub baseurl: Option<String>,
    /// Service provider section.
    pub sp: SpSettings,
    /// Identity provider section.
    pub idp: IdpSettings,
}

impl EngineSettings {
    /// Renders the document as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Renders the document as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// An endpoint and the binding it is reached with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint location.
    pub url: String,
    /// Binding URI.
    pub binding: SamlBinding,
}

/// The IdP single logout endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutEndpoint {
    /// Where logout requests are sent.
    pub url: String,
    /// Where logout responses are sent, when different from `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
    /// Binding URI.
    pub binding: SamlBinding,
}

/// Service provider section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpSettings {
    /// SP entity ID.
    pub entity_id: String,
    /// Where the IdP posts login responses.
    pub assertion_consumer_service: Endpoint,
    /// Where the IdP redirects logout responses.
    pub single_logout_service: Endpoint,
    /// Requested name ID format.
    #[serde(rename = "NameIDFormat")]
    pub name_id_format: NameIdFormat,
    /// SP certificate.
    #[serde(rename = "x509cert")]
    pub x509_cert: String,
    /// SP private key.
    pub private_key: String,
    /// Requested attributes; present only when attributes are requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_consuming_service: Option<AttributeConsumingService>,
}

/// The attribute consuming service block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeConsumingService {
    /// The SP display name.
    pub service_name: String,
    /// The SP description.
    pub service_description: String,
    /// Requested attributes, in configuration order.
    pub requested_attributes: Vec<RequestedAttributeSettings>,
}

/// One requested attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedAttributeSettings {
    /// Formal attribute name.
    pub name: String,
    /// Whether the IdP must release it.
    pub is_required: bool,
    /// Friendly name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    /// Name format URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_format: Option<AttributeNameFormat>,
    /// Expected values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<Vec<String>>,
}

/// Identity provider section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdpSettings {
    /// IdP entity ID.
    pub entity_id: String,
    /// Where authentication requests are sent.
    pub single_sign_on_service: Endpoint,
    /// Where logout requests and responses are sent.
    pub single_logout_service: LogoutEndpoint,
    /// Trusted IdP certificates.
    #[serde(flatten)]
    pub certificates: IdpCertificates,
}

/// IdP certificates, in the engine's single or multi-certificate form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdpCertificates {
    /// Exactly one signing certificate and no encryption certificate.
    #[serde(rename = "x509cert")]
    Single(String),
    /// Any other combination.
    #[serde(rename = "x509certMulti")]
    Multi {
        /// Signing certificates, in configuration order.
        signing: Vec<String>,
        /// Encryption certificates, in configuration order.
        encryption: Vec<String>,
    },
}

impl IdpCertificates {
    /// Returns the signing certificates.
    #[must_use]
    pub fn signing(&self) -> &[String] {
        match self {
            Self::Single(cert) => std::slice::from_ref(cert),
            Self::Multi { signing, .. } => signing,
        }
    }

    /// Returns the encryption certificates.
    #[must_use]
    pub fn encryption(&self) -> &[String] {
        match self {
            Self::Single(_) => &[],
            Self::Multi { encryption, .. } => encryption,
        }
    }
}
