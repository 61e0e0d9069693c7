//! SP and IdP configuration.
//!
//! Descriptors are built programmatically or loaded from TOML, composed into
//! a [`SamlConfig`], and turned into the [`EngineSettings`] document the
//! SAML engine is initialised with.

mod file;
mod identity_provider;
mod saml;
mod service_provider;
mod settings;

pub use identity_provider::IdentityProviderConfig;
pub use saml::SamlConfig;
pub use service_provider::ServiceProviderConfig;
pub use settings::{
    AttributeConsumingService, EngineSettings, Endpoint, IdpCertificates, IdpSettings,
    LogoutEndpoint, RequestedAttributeSettings, SpSettings,
};
