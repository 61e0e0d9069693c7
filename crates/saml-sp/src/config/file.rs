//! Loading a [`SamlConfig`] from a TOML file.
//!
//! Certificates and keys can be given inline as PEM or as file paths;
//! relative paths are resolved against the directory of the configuration
//! file. The file goes through the same constructors as programmatic
//! configuration, so the same invariants apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::types::{AttributeNameFormat, NameIdFormat, RequestedAttribute};

use super::{IdentityProviderConfig, SamlConfig, ServiceProviderConfig};

fn default_true() -> bool {
    true
}

/// Top-level layout of the configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SamlConfigFile {
    #[serde(default = "default_true")]
    strict: bool,
    #[serde(default)]
    debug: bool,
    service_provider: ServiceProviderFile,
    identity_provider: IdentityProviderFile,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceProviderFile {
    entity_id: String,
    display_name: String,
    description: String,
    login_handler_url: String,
    logout_handler_url: String,
    #[serde(default)]
    name_id_format: Option<NameIdFormat>,
    #[serde(default)]
    public_cert: Option<String>,
    #[serde(default)]
    public_cert_file: Option<PathBuf>,
    #[serde(default)]
    private_key: Option<String>,
    #[serde(default)]
    private_key_file: Option<PathBuf>,
    #[serde(default)]
    requested_attributes: Vec<RequestedAttributeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequestedAttributeFile {
    name: String,
    #[serde(default)]
    is_required: bool,
    #[serde(default)]
    friendly_name: Option<String>,
    #[serde(default)]
    name_format: Option<AttributeNameFormat>,
    #[serde(default)]
    attribute_values: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IdentityProviderFile {
    entity_id: String,
    auth_url: String,
    logout_url: String,
    #[serde(default)]
    logout_response_url: Option<String>,
    #[serde(default)]
    signing_certificates: Vec<String>,
    #[serde(default)]
    signing_certificate_files: Vec<PathBuf>,
    #[serde(default)]
    encryption_certificates: Vec<String>,
    #[serde(default)]
    encryption_certificate_files: Vec<PathBuf>,
}

impl SamlConfig {
    /// Parses a configuration from TOML.
    ///
    /// Relative certificate and key paths are resolved against the current
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the document is malformed, a referenced
    /// file cannot be read, or a configuration invariant is violated.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::from_toml_with_base(content, Path::new("."))
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or a
    /// configuration invariant is violated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = read_file(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let config = Self::from_toml_with_base(&content, base)?;

        tracing::debug!(
            path = %path.display(),
            sp = config.service_provider().entity_id(),
            idp = config.identity_provider().entity_id(),
            "loaded SAML configuration"
        );

        Ok(config)
    }

    fn from_toml_with_base(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let file: SamlConfigFile = toml::from_str(content)?;

        let service_provider = file.service_provider.into_config(base)?;
        let identity_provider = file.identity_provider.into_config(base)?;

        Ok(Self::new(service_provider, identity_provider)
            .with_strict(file.strict)
            .with_debug(file.debug))
    }
}

impl ServiceProviderFile {
    fn into_config(self, base: &Path) -> Result<ServiceProviderConfig, ConfigError> {
        let public_cert = inline_or_file(
            self.public_cert,
            self.public_cert_file.as_deref(),
            base,
            "service_provider.public_cert",
        )?;
        let private_key = inline_or_file(
            self.private_key,
            self.private_key_file.as_deref(),
            base,
            "service_provider.private_key",
        )?;

        let config = ServiceProviderConfig::new(
            self.entity_id,
            self.display_name,
            self.description,
            self.login_handler_url,
            self.logout_handler_url,
            public_cert,
            private_key,
        )
        .with_name_id_format(self.name_id_format.unwrap_or_default())
        .with_requested_attributes(
            self.requested_attributes
                .into_iter()
                .map(RequestedAttributeFile::into_attribute),
        );

        Ok(config)
    }
}

impl RequestedAttributeFile {
    fn into_attribute(self) -> RequestedAttribute {
        let mut attribute = RequestedAttribute::new(self.name, self.is_required);
        if let Some(friendly_name) = self.friendly_name {
            attribute = attribute.with_friendly_name(friendly_name);
        }
        if let Some(name_format) = self.name_format {
            attribute = attribute.with_name_format(name_format);
        }
        if let Some(values) = self.attribute_values {
            attribute = attribute.with_attribute_values(values);
        }
        attribute
    }
}

impl IdentityProviderFile {
    fn into_config(self, base: &Path) -> Result<IdentityProviderConfig, ConfigError> {
        let signing = merge_certificates(
            self.signing_certificates,
            &self.signing_certificate_files,
            base,
        )?;
        let encryption = merge_certificates(
            self.encryption_certificates,
            &self.encryption_certificate_files,
            base,
        )?;

        let mut config =
            IdentityProviderConfig::new(self.entity_id, self.auth_url, self.logout_url, signing)?
                .with_encryption_certificates(encryption);
        if let Some(url) = self.logout_response_url {
            config = config.with_logout_response_url(url);
        }
        Ok(config)
    }
}

/// Resolves a value given either inline or as a file; inline wins.
fn inline_or_file(
    inline: Option<String>,
    file: Option<&Path>,
    base: &Path,
    field: &str,
) -> Result<String, ConfigError> {
    match (inline, file) {
        (Some(value), None) => Ok(value),
        (None, Some(path)) => read_file(&base.join(path)),
        (Some(_), Some(_)) => Err(ConfigError::Parse(format!(
            "{field} and {field}_file are mutually exclusive"
        ))),
        (None, None) => Err(ConfigError::Parse(format!(
            "one of {field} or {field}_file is required"
        ))),
    }
}

/// Inline certificates first, then file certificates, each in order.
fn merge_certificates(
    inline: Vec<String>,
    files: &[PathBuf],
    base: &Path,
) -> Result<Vec<String>, ConfigError> {
    let mut certificates = inline;
    for path in files {
        certificates.push(read_file(&base.join(path))?);
    }
    Ok(certificates)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
