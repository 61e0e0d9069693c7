//! Service provider descriptor.

use crate::types::{NameIdFormat, RequestedAttribute, SamlBinding};

use super::settings::{
    AttributeConsumingService, Endpoint, RequestedAttributeSettings, SpSettings,
};

/// The service provider: this application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProviderConfig {
    entity_id: String,
    display_name: String,
    description: String,
    login_handler_url: String,
    logout_handler_url: String,
    public_cert: String,
    private_key: String,
    name_id_format: NameIdFormat,
    requested_attributes: Vec<RequestedAttribute>,
}

impl ServiceProviderConfig {
    /// Creates the SP configuration.
    ///
    /// `login_handler_url` receives the IdP's login response (assertion
    /// consumer service), `logout_handler_url` its logout response. The
    /// certificate/key pair signs outgoing requests and metadata and
    /// decrypts encrypted assertions.
    #[must_use]
    pub fn new(
        entity_id: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        login_handler_url: impl Into<String>,
        logout_handler_url: impl Into<String>,
        public_cert: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            display_name: display_name.into(),
            description: description.into(),
            login_handler_url: login_handler_url.into(),
            logout_handler_url: logout_handler_url.into(),
            public_cert: public_cert.into(),
            private_key: private_key.into(),
            name_id_format: NameIdFormat::default(),
            requested_attributes: Vec::new(),
        }
    }

    /// Sets the name ID format requested from the IdP.
    #[must_use]
    pub const fn with_name_id_format(mut self, format: NameIdFormat) -> Self {
        self.name_id_format = format;
        self
    }

    /// Adds a requested attribute.
    #[must_use]
    pub fn with_requested_attribute(mut self, attribute: RequestedAttribute) -> Self {
        self.requested_attributes.push(attribute);
        self
    }

    /// Adds several requested attributes, preserving order.
    #[must_use]
    pub fn with_requested_attributes(
        mut self,
        attributes: impl IntoIterator<Item = RequestedAttribute>,
    ) -> Self {
        self.requested_attributes.extend(attributes);
        self
    }

    /// Returns the SP entity ID.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the service name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the service description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the assertion consumer service URL.
    #[must_use]
    pub fn login_handler_url(&self) -> &str {
        &self.login_handler_url
    }

    /// Returns the single logout service URL.
    #[must_use]
    pub fn logout_handler_url(&self) -> &str {
        &self.logout_handler_url
    }

    /// Returns the SP certificate (PEM).
    #[must_use]
    pub fn public_cert(&self) -> &str {
        &self.public_cert
    }

    /// Returns the SP private key (PEM).
    #[must_use]
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Returns the requested name ID format.
    #[must_use]
    pub const fn name_id_format(&self) -> NameIdFormat {
        self.name_id_format
    }

    /// Returns the requested attributes, in order.
    #[must_use]
    pub fn requested_attributes(&self) -> &[RequestedAttribute] {
        &self.requested_attributes
    }

    /// Builds the `sp` section of the engine settings.
    pub(crate) fn to_settings(&self) -> SpSettings {
        let attribute_consuming_service = (!self.requested_attributes.is_empty()).then(|| {
            AttributeConsumingService {
                service_name: self.display_name.clone(),
                service_description: self.description.clone(),
                requested_attributes: self
                    .requested_attributes
                    .iter()
                    .map(RequestedAttributeSettings::from)
                    .collect(),
            }
        });

        SpSettings {
            entity_id: self.entity_id.clone(),
            assertion_consumer_service: Endpoint {
                url: self.login_handler_url.clone(),
                binding: SamlBinding::HttpPost,
            },
            single_logout_service: Endpoint {
                url: self.logout_handler_url.clone(),
                binding: SamlBinding::HttpRedirect,
            },
            name_id_format: self.name_id_format,
            x509_cert: self.public_cert.clone(),
            private_key: self.private_key.clone(),
            attribute_consuming_service,
        }
    }
}

impl From<&RequestedAttribute> for RequestedAttributeSettings {
    fn from(attribute: &RequestedAttribute) -> Self {
        Self {
            name: attribute.name().to_string(),
            is_required: attribute.is_required(),
            friendly_name: attribute.friendly_name().map(str::to_string),
            name_format: attribute.name_format(),
            attribute_value: attribute.attribute_values().map(<[String]>::to_vec),
        }
    }
}
