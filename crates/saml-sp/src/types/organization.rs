//! Organization descriptions for the SP metadata.

use crate::error::ConfigError;

use super::{DescriptorSet, Keyed};

/// Language used when a translation does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// One localized description of the organization behind the SP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationTranslation {
    language_code: String,
    name: String,
    display_name: String,
    url: String,
}

impl OrganizationTranslation {
    /// Creates an English translation.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            language_code: DEFAULT_LANGUAGE.to_string(),
            name: name.into(),
            display_name: display_name.into(),
            url: url.into(),
        }
    }

    /// Sets the language code.
    #[must_use]
    pub fn with_language(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = language_code.into();
        self
    }

    /// Returns the language code.
    #[must_use]
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Returns the `OrganizationName`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the `OrganizationDisplayName`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the `OrganizationURL`.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Keyed for OrganizationTranslation {
    type Key = str;

    fn key(&self) -> &str {
        &self.language_code
    }
}

/// The organization behind the SP, described in one or more languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    translations: DescriptorSet<OrganizationTranslation>,
}

impl Organization {
    /// Creates an organization from its translations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyOrganization`] if no translation is given.
    pub fn new(
        translations: impl IntoIterator<Item = OrganizationTranslation>,
    ) -> Result<Self, ConfigError> {
        let translations: DescriptorSet<_> = translations.into_iter().collect();
        if translations.is_empty() {
            return Err(ConfigError::EmptyOrganization);
        }
        Ok(Self { translations })
    }

    /// Returns the translations in insertion order.
    #[must_use]
    pub fn translations(&self) -> &[OrganizationTranslation] {
        self.translations.as_slice()
    }

    /// Returns the translation for a language code.
    #[must_use]
    pub fn translation(&self, language_code: &str) -> Option<&OrganizationTranslation> {
        self.translations.get(language_code)
    }
}
