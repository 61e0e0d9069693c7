//! The unified SAML configuration.

use super::settings::EngineSettings;
use super::{IdentityProviderConfig, ServiceProviderConfig};

/// Complete configuration for one SP/IdP pairing.
///
/// This is the root aggregate handed to the
/// [`AuthClient`](crate::client::AuthClient); it owns both descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamlConfig {
    service_provider: ServiceProviderConfig,
    identity_provider: IdentityProviderConfig,
    strict: bool,
    debug: bool,
}

impl SamlConfig {
    /// Creates a strict, non-debug configuration.
    #[must_use]
    pub const fn new(
        service_provider: ServiceProviderConfig,
        identity_provider: IdentityProviderConfig,
    ) -> Self {
        Self {
            service_provider,
            identity_provider,
            strict: true,
            debug: false,
        }
    }

    /// Sets strict mode.
    ///
    /// In strict mode the engine rejects unsigned or unencrypted messages
    /// when it expects them signed or encrypted, and validates destination,
    /// NameID and conditions.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets debug mode.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the SP descriptor.
    #[must_use]
    pub const fn service_provider(&self) -> &ServiceProviderConfig {
        &self.service_provider
    }

    /// Returns the IdP descriptor.
    #[must_use]
    pub const fn identity_provider(&self) -> &IdentityProviderConfig {
        &self.identity_provider
    }

    /// Returns whether strict mode is on.
    #[must_use]
    pub const fn strict(&self) -> bool {
        self.strict
    }

    /// Returns whether debug mode is on.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Builds the settings document for the engine.
    #[must_use]
    pub fn to_settings(&self) -> EngineSettings {
        EngineSettings {
            strict: self.strict,
            debug: self.debug,
            baseurl: None,
            sp: self.service_provider.to_settings(),
            idp: self.identity_provider.to_settings(),
        }
    }

    /// Renders the settings document as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        self.to_settings().to_json()
    }
}
