//! Identity provider descriptor.

use crate::error::ConfigError;
use crate::types::SamlBinding;

use super::settings::{Endpoint, IdpCertificates, IdpSettings, LogoutEndpoint};

/// The identity provider the SP trusts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityProviderConfig {
    entity_id: String,
    auth_url: String,
    logout_url: String,
    logout_response_url: Option<String>,
    signing_certificates: Vec<String>,
    encryption_certificates: Vec<String>,
}

impl IdentityProviderConfig {
    /// Creates the IdP configuration.
    ///
    /// Every certificate in `signing_certificates` is trusted to verify IdP
    /// messages, which allows rolling the IdP's signing key over.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSigningCertificate`] if no signing
    /// certificate is given.
    pub fn new<I, S>(
        entity_id: impl Into<String>,
        auth_url: impl Into<String>,
        logout_url: impl Into<String>,
        signing_certificates: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let signing_certificates: Vec<String> =
            signing_certificates.into_iter().map(Into::into).collect();
        if signing_certificates.is_empty() {
            return Err(ConfigError::NoSigningCertificate);
        }

        Ok(Self {
            entity_id: entity_id.into(),
            auth_url: auth_url.into(),
            logout_url: logout_url.into(),
            logout_response_url: None,
            signing_certificates,
            encryption_certificates: Vec::new(),
        })
    }

    /// Sets the URL the SP sends logout responses to.
    #[must_use]
    pub fn with_logout_response_url(mut self, url: impl Into<String>) -> Self {
        self.logout_response_url = Some(url.into());
        self
    }

    /// Sets the certificates used for messages encrypted by the IdP.
    #[must_use]
    pub fn with_encryption_certificates<I, S>(mut self, certificates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.encryption_certificates = certificates.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the IdP entity ID.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the SSO endpoint.
    #[must_use]
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    /// Returns the SLO endpoint.
    #[must_use]
    pub fn logout_url(&self) -> &str {
        &self.logout_url
    }

    /// Returns the explicitly configured logout response URL.
    #[must_use]
    pub fn logout_response_url(&self) -> Option<&str> {
        self.logout_response_url.as_deref()
    }

    /// Returns the URL logout responses go to, falling back to the SLO
    /// endpoint.
    #[must_use]
    pub fn effective_logout_response_url(&self) -> &str {
        self.logout_response_url
            .as_deref()
            .unwrap_or(&self.logout_url)
    }

    /// Returns the trusted signing certificates, in order.
    #[must_use]
    pub fn signing_certificates(&self) -> &[String] {
        &self.signing_certificates
    }

    /// Returns the encryption certificates, in order.
    #[must_use]
    pub fn encryption_certificates(&self) -> &[String] {
        &self.encryption_certificates
    }

    /// Builds the `idp` section of the engine settings.
    pub(crate) fn to_settings(&self) -> IdpSettings {
        let certificates = match (
            self.signing_certificates.as_slice(),
            self.encryption_certificates.is_empty(),
        ) {
            ([single], true) => IdpCertificates::Single(single.clone()),
            _ => IdpCertificates::Multi {
                signing: self.signing_certificates.clone(),
                encryption: self.encryption_certificates.clone(),
            },
        };

        IdpSettings {
            entity_id: self.entity_id.clone(),
            single_sign_on_service: Endpoint {
                url: self.auth_url.clone(),
                binding: SamlBinding::HttpRedirect,
            },
            single_logout_service: LogoutEndpoint {
                url: self.logout_url.clone(),
                response_url: self.logout_response_url.clone(),
                binding: SamlBinding::HttpRedirect,
            },
            certificates,
        }
    }
}
