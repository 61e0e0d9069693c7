//! The SAML protocol engine seam.
//!
//! XML handling, signatures, encryption and binding transport all live in an
//! external engine. This module defines the narrow interface the
//! [`AuthClient`](crate::client::AuthClient) drives it through. Every
//! operation returns its own result, so no error state survives from one
//! call to the next.

use std::collections::BTreeMap;

use thiserror::Error;
use url::Url;

use crate::config::EngineSettings;
use crate::types::NameIdFormat;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine rejected a SAML message.
    #[error("message rejected: {reasons:?}")]
    Rejected {
        /// Error codes or messages, in the order the engine found them.
        reasons: Vec<String>,
        /// Detailed reason for the last error, if the engine gives one.
        last_reason: Option<String>,
    },

    /// The engine failed for a reason other than message validation.
    #[error("engine failure: {0}")]
    Failure(String),
}

impl EngineError {
    /// Creates a rejection with a single reason.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::Rejected {
            reasons: vec![reason.clone()],
            last_reason: Some(reason),
        }
    }
}

/// Options for an authentication request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginOptions {
    /// Ask the IdP to re-authenticate the user even with an IdP session.
    pub force_authn: bool,
    /// Ask the IdP not to interact with the user.
    pub is_passive: bool,
    /// Include a `NameIDPolicy` in the request.
    pub set_name_id_policy: bool,
}

impl Default for LoginOptions {
    fn default() -> Self {
        Self {
            force_authn: false,
            is_passive: false,
            set_name_id_policy: true,
        }
    }
}

/// Options for a logout request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutOptions {
    /// Name identifier of the subject being logged out.
    pub name_id: Option<String>,
    /// IdP session index to terminate.
    pub session_index: Option<String>,
    /// Format of `name_id`.
    pub name_id_format: Option<NameIdFormat>,
}

impl LogoutOptions {
    /// Creates options targeting one authenticated subject and session.
    #[must_use]
    pub fn for_subject(name_id: impl Into<String>, session_index: impl Into<String>) -> Self {
        Self {
            name_id: Some(name_id.into()),
            session_index: Some(session_index.into()),
            name_id_format: None,
        }
    }
}

/// What the engine extracted from a validated, successful login response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionData {
    /// Released attributes by name.
    pub attributes: BTreeMap<String, Vec<String>>,
    /// Subject name identifier.
    pub name_id: String,
    /// Name identifier format URI.
    pub name_id_format: String,
    /// `NameQualifier` of the name identifier.
    pub name_id_name_qualifier: Option<String>,
    /// `SPNameQualifier` of the name identifier.
    pub sp_name_qualifier: Option<String>,
    /// IdP session index.
    pub session_index: String,
}

/// Outcome of processing a login response that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// The subject is authenticated.
    Authenticated(AssertionData),
    /// The response is valid but does not authenticate the subject.
    NotAuthenticated,
}

/// A SAML protocol engine.
///
/// Implementations hold per-exchange state and are used through `&mut self`
/// by a single client.
pub trait SamlEngine {
    /// Initialises the engine with the settings document.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the settings.
    fn initialize(&mut self, settings: &EngineSettings) -> EngineResult<()>;

    /// Builds an `AuthnRequest` and returns the IdP URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn login(&mut self, return_to: &Url, options: &LoginOptions) -> EngineResult<String>;

    /// Validates a login response.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rejected`] if validation fails.
    fn process_response(&mut self, payload: &str) -> EngineResult<ResponseOutcome>;

    /// Builds a `LogoutRequest` and returns the IdP URL to redirect to.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    fn logout(&mut self, return_to: &Url, options: &LogoutOptions) -> EngineResult<String>;

    /// Validates a logout response and returns the IdP's post-logout
    /// redirect target, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rejected`] if validation fails.
    fn process_slo(&mut self, payload: &str) -> EngineResult<Option<String>>;

    /// Signs a metadata document.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    fn sign_metadata(
        &mut self,
        metadata: &str,
        private_key: &str,
        certificate: &str,
    ) -> EngineResult<String>;
}

/// A scripted engine for tests.
#[cfg(any(test, feature = "test-util"))]
pub mod testing {
    use url::Url;

    use super::{
        EngineError, EngineResult, LoginOptions, LogoutOptions, ResponseOutcome, SamlEngine,
    };
    use crate::config::EngineSettings;
    use crate::types::XMLDSIG_NS;

    /// A call the scripted engine received.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum EngineCall {
        /// `initialize`.
        Initialize,
        /// `login`.
        Login {
            /// Return URL.
            return_to: String,
            /// Options passed.
            options: LoginOptions,
        },
        /// `process_response`.
        ProcessResponse {
            /// Raw payload.
            payload: String,
        },
        /// `logout`.
        Logout {
            /// Return URL.
            return_to: String,
            /// Options passed.
            options: LogoutOptions,
        },
        /// `process_slo`.
        ProcessSlo {
            /// Raw payload.
            payload: String,
        },
        /// `sign_metadata`.
        SignMetadata,
    }

    /// Engine that answers with scripted results and records its calls.
    ///
    /// Redirects point at the configured IdP endpoints with a placeholder
    /// `SAMLRequest` and the return URL as `RelayState`.
    #[derive(Debug, Default)]
    pub struct ScriptedEngine {
        settings: Option<EngineSettings>,
        init_failure: Option<String>,
        response: Option<EngineResult<ResponseOutcome>>,
        slo: Option<EngineResult<Option<String>>>,
        calls: Vec<EngineCall>,
    }

    impl ScriptedEngine {
        /// Creates an engine with nothing scripted.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes `initialize` fail.
        #[must_use]
        pub fn failing_initialize(mut self, message: impl Into<String>) -> Self {
            self.init_failure = Some(message.into());
            self
        }

        /// Scripts the result of the next `process_response`.
        #[must_use]
        pub fn with_response(mut self, result: EngineResult<ResponseOutcome>) -> Self {
            self.response = Some(result);
            self
        }

        /// Scripts the result of the next `process_slo`.
        #[must_use]
        pub fn with_slo(mut self, result: EngineResult<Option<String>>) -> Self {
            self.slo = Some(result);
            self
        }

        /// Returns the settings the engine was initialised with.
        #[must_use]
        pub const fn settings(&self) -> Option<&EngineSettings> {
            self.settings.as_ref()
        }

        /// Returns the calls received so far.
        #[must_use]
        pub fn calls(&self) -> &[EngineCall] {
            &self.calls
        }

        fn settings_or_fail(&self) -> EngineResult<&EngineSettings> {
            self.settings
                .as_ref()
                .ok_or_else(|| EngineError::Failure("engine not initialised".to_string()))
        }

        fn redirect(target: &str, return_to: &Url) -> EngineResult<String> {
            let mut url = Url::parse(target)
                .map_err(|e| EngineError::Failure(format!("invalid IdP endpoint: {e}")))?;
            url.query_pairs_mut()
                .append_pair("SAMLRequest", "scripted")
                .append_pair("RelayState", return_to.as_str());
            Ok(url.into())
        }
    }

    impl SamlEngine for ScriptedEngine {
        fn initialize(&mut self, settings: &EngineSettings) -> EngineResult<()> {
            self.calls.push(EngineCall::Initialize);
            if let Some(message) = self.init_failure.take() {
                return Err(EngineError::Failure(message));
            }
            self.settings = Some(settings.clone());
            Ok(())
        }

        fn login(&mut self, return_to: &Url, options: &LoginOptions) -> EngineResult<String> {
            self.calls.push(EngineCall::Login {
                return_to: return_to.to_string(),
                options: *options,
            });
            let target = self.settings_or_fail()?.idp.single_sign_on_service.url.clone();
            Self::redirect(&target, return_to)
        }

        fn process_response(&mut self, payload: &str) -> EngineResult<ResponseOutcome> {
            self.calls.push(EngineCall::ProcessResponse {
                payload: payload.to_string(),
            });
            self.settings_or_fail()?;
            self.response
                .take()
                .unwrap_or_else(|| Err(EngineError::rejected("no response scripted")))
        }

        fn logout(&mut self, return_to: &Url, options: &LogoutOptions) -> EngineResult<String> {
            self.calls.push(EngineCall::Logout {
                return_to: return_to.to_string(),
                options: options.clone(),
            });
            let target = self.settings_or_fail()?.idp.single_logout_service.url.clone();
            Self::redirect(&target, return_to)
        }

        fn process_slo(&mut self, payload: &str) -> EngineResult<Option<String>> {
            self.calls.push(EngineCall::ProcessSlo {
                payload: payload.to_string(),
            });
            self.settings_or_fail()?;
            self.slo
                .take()
                .unwrap_or_else(|| Err(EngineError::rejected("no logout response scripted")))
        }

        fn sign_metadata(
            &mut self,
            metadata: &str,
            private_key: &str,
            certificate: &str,
        ) -> EngineResult<String> {
            self.calls.push(EngineCall::SignMetadata);
            if private_key.is_empty() || certificate.is_empty() {
                return Err(EngineError::Failure("missing signing key material".to_string()));
            }
            Ok(metadata.replacen(
                "<md:SPSSODescriptor",
                &format!("<ds:Signature xmlns:ds=\"{XMLDSIG_NS}\"/><md:SPSSODescriptor"),
                1,
            ))
        }
    }
}
