//! SAML error types.
//!
//! Two layers of failure are distinguished:
//!
//! - [`ConfigError`] - invariant violations while building the configuration
//!   (empty organization, no IdP signing certificate, unreadable files).
//!   These are programmer or deployment errors and surface before any
//!   engine interaction.
//! - [`SamlError`] - failures of a login/logout exchange, translated from
//!   the engine's per-call result.

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::EngineError;

/// Result type for SAML operations.
pub type SamlResult<T> = Result<T, SamlError>;

/// Errors raised while building a [`SamlConfig`](crate::config::SamlConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An organization was built without any translation.
    #[error("an organization requires at least one translation")]
    EmptyOrganization,

    /// The identity provider has no signing certificate to verify against.
    #[error("identity provider requires at least one signing certificate")]
    NoSigningCertificate,

    /// A URI did not match any of the closed set of SAML constants.
    #[error("unrecognised SAML constant: {0}")]
    UnknownFormat(String),

    /// A configuration, certificate or key file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors surfaced by the authentication session client.
#[derive(Debug, Error)]
pub enum SamlError {
    /// A caller-supplied return URL is not an absolute URL with a path.
    #[error("invalid URL passed: {0}")]
    InvalidUrl(String),

    /// The engine rejected the SAML message.
    #[error("there were errors in the SAML message: {last_reason}")]
    Validation {
        /// Every error the engine reported, in order.
        reasons: Vec<String>,
        /// The most specific reason for the last error.
        last_reason: String,
    },

    /// The response validated but does not authenticate the subject.
    #[error("the SAML response does not authenticate the user")]
    NotAuthenticated,

    /// The engine failed for a reason unrelated to message validation.
    #[error("SAML engine error: {0}")]
    Engine(String),

    /// Metadata could not be written.
    #[error("metadata generation error: {0}")]
    Metadata(String),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SamlError {
    /// Returns the error list for validation failures, empty otherwise.
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        match self {
            Self::Validation { reasons, .. } => reasons,
            _ => &[],
        }
    }

    /// Returns true if the caller can recover by supplying different input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidUrl(_) | Self::Validation { .. } | Self::NotAuthenticated
        )
    }

    /// Returns the HTTP status a hosting application would typically map
    /// this error to.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidUrl(_) => 400,
            Self::Validation { .. } | Self::NotAuthenticated => 401,
            Self::Engine(_) | Self::Metadata(_) | Self::Config(_) => 500,
        }
    }
}

/// Reason recorded when the engine rejects a message without giving one.
const UNSPECIFIED_REJECTION: &str = "SAML engine rejected the message without a reason";

impl From<EngineError> for SamlError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rejected {
                mut reasons,
                last_reason,
            } => {
                let last_reason = last_reason
                    .filter(|reason| !reason.is_empty())
                    .or_else(|| reasons.last().cloned())
                    .unwrap_or_else(|| UNSPECIFIED_REJECTION.to_string());
                if reasons.is_empty() {
                    reasons.push(last_reason.clone());
                }
                Self::Validation {
                    reasons,
                    last_reason,
                }
            }
            EngineError::Failure(message) => Self::Engine(message),
        }
    }
}

impl From<quick_xml::Error> for SamlError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Metadata(err.to_string())
    }
}
