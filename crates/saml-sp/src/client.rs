//! The authentication session client.
//!
//! An [`AuthClient`] owns one engine initialised from one [`SamlConfig`] and
//! drives the login and logout exchanges through it. It is meant to be
//! built per incoming request.

use url::Url;

use crate::config::SamlConfig;
use crate::engine::{LoginOptions, LogoutOptions, ResponseOutcome, SamlEngine};
use crate::error::{SamlError, SamlResult};
use crate::metadata::{MetadataBuilder, MetadataOptions};
use crate::types::{AuthenticatedSession, SamlBinding};

/// Where an exchange driven by an [`AuthClient`] currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExchangeState {
    /// No exchange started.
    #[default]
    Idle,
    /// A login redirect was produced.
    LoginRequested,
    /// A login response is being processed.
    ResponseReceived,
    /// The login response authenticated the subject.
    Authenticated,
    /// A logout redirect was produced.
    LogoutRequested,
    /// A logout response is being processed.
    LogoutResponseReceived,
    /// The logout response was accepted.
    LoggedOut,
    /// The last exchange failed.
    Failed,
}

impl ExchangeState {
    /// Returns true for states no further transition leaves.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::LoginRequested
                | Self::Authenticated
                | Self::LogoutRequested
                | Self::LoggedOut
                | Self::Failed
        )
    }
}

/// An instruction for the transport layer to send the user agent elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDirective {
    /// Target URL built by the engine.
    pub location: String,
    /// Binding used to reach `location`.
    pub binding: SamlBinding,
}

impl RedirectDirective {
    fn redirect(location: String) -> Self {
        Self {
            location,
            binding: SamlBinding::HttpRedirect,
        }
    }

    /// Returns the HTTP method for the redirect.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        self.binding.http_method()
    }
}

/// SAML client for one SP/IdP pairing.
#[derive(Debug)]
pub struct AuthClient<E> {
    config: SamlConfig,
    engine: E,
    state: ExchangeState,
}

impl<E: SamlEngine> AuthClient<E> {
    /// Creates a client and initialises the engine with the configuration's
    /// settings document.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Engine`] if the engine rejects the settings.
    pub fn new(config: SamlConfig, mut engine: E) -> SamlResult<Self> {
        engine.initialize(&config.to_settings())?;

        tracing::debug!(
            sp = config.service_provider().entity_id(),
            idp = config.identity_provider().entity_id(),
            strict = config.strict(),
            "initialised SAML engine"
        );

        Ok(Self {
            config,
            engine,
            state: ExchangeState::Idle,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &SamlConfig {
        &self.config
    }

    /// Returns the engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the state of the most recent exchange.
    #[must_use]
    pub const fn state(&self) -> ExchangeState {
        self.state
    }

    /// Consumes the client and returns the engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Starts a login with default request options.
    ///
    /// # Errors
    ///
    /// See [`initiate_login_with`](Self::initiate_login_with).
    pub fn initiate_login(&mut self, return_url: &str) -> SamlResult<RedirectDirective> {
        self.initiate_login_with(return_url, &LoginOptions::default())
    }

    /// Starts a login and returns the redirect to the IdP.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::InvalidUrl`] if `return_url` is not an absolute
    /// URL with a host and a path, before the engine is involved. Engine
    /// failures are translated.
    pub fn initiate_login_with(
        &mut self,
        return_url: &str,
        options: &LoginOptions,
    ) -> SamlResult<RedirectDirective> {
        let return_to = validate_return_url(return_url)?;

        match self.engine.login(&return_to, options) {
            Ok(location) => {
                self.state = ExchangeState::LoginRequested;
                tracing::info!(
                    idp = self.config.identity_provider().entity_id(),
                    force_authn = options.force_authn,
                    is_passive = options.is_passive,
                    "redirecting to IdP for login"
                );
                Ok(RedirectDirective::redirect(location))
            }
            Err(e) => {
                self.state = ExchangeState::Failed;
                Err(e.into())
            }
        }
    }

    /// Processes a login response posted back by the IdP.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Validation`] if the engine rejects the response
    /// and [`SamlError::NotAuthenticated`] if it validates without
    /// authenticating the subject.
    pub fn handle_login_response(&mut self, payload: &str) -> SamlResult<AuthenticatedSession> {
        self.state = ExchangeState::ResponseReceived;

        let outcome = match self.engine.process_response(payload) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail(e.into())),
        };

        match outcome {
            ResponseOutcome::Authenticated(assertion) => {
                self.state = ExchangeState::Authenticated;
                let session = AuthenticatedSession::from(assertion);
                tracing::info!(
                    idp = self.config.identity_provider().entity_id(),
                    attributes = session.user_attributes().len(),
                    "SAML login accepted"
                );
                Ok(session)
            }
            ResponseOutcome::NotAuthenticated => Err(self.fail(SamlError::NotAuthenticated)),
        }
    }

    /// Starts a logout with no subject information.
    ///
    /// # Errors
    ///
    /// See [`initiate_logout_with`](Self::initiate_logout_with).
    pub fn initiate_logout(&mut self, return_url: &str) -> SamlResult<RedirectDirective> {
        self.initiate_logout_with(return_url, &LogoutOptions::default())
    }

    /// Starts a logout and returns the redirect to the IdP.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::InvalidUrl`] if `return_url` is not an absolute
    /// URL with a host and a path. Engine failures are translated.
    pub fn initiate_logout_with(
        &mut self,
        return_url: &str,
        options: &LogoutOptions,
    ) -> SamlResult<RedirectDirective> {
        let return_to = validate_return_url(return_url)?;

        match self.engine.logout(&return_to, options) {
            Ok(location) => {
                self.state = ExchangeState::LogoutRequested;
                tracing::info!(
                    idp = self.config.identity_provider().entity_id(),
                    with_session = options.session_index.is_some(),
                    "redirecting to IdP for logout"
                );
                Ok(RedirectDirective::redirect(location))
            }
            Err(e) => {
                self.state = ExchangeState::Failed;
                Err(e.into())
            }
        }
    }

    /// Processes a logout response from the IdP.
    ///
    /// Returns the IdP's post-logout redirect target, or an empty string
    /// when it gives none.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Validation`] if the engine rejects the response.
    pub fn handle_logout_response(&mut self, payload: &str) -> SamlResult<String> {
        self.state = ExchangeState::LogoutResponseReceived;

        match self.engine.process_slo(payload) {
            Ok(target) => {
                self.state = ExchangeState::LoggedOut;
                tracing::info!(
                    idp = self.config.identity_provider().entity_id(),
                    "SAML logout accepted"
                );
                Ok(target.unwrap_or_default())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Generates the SP metadata document, signed through the engine when
    /// `options.sign` is set.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Metadata`] if the document cannot be written and
    /// [`SamlError::Engine`] if signing fails.
    pub fn service_provider_metadata(&mut self, options: &MetadataOptions) -> SamlResult<String> {
        MetadataBuilder::new(self.config.service_provider()).generate(&mut self.engine, options)
    }

    fn fail(&mut self, err: SamlError) -> SamlError {
        self.state = ExchangeState::Failed;
        tracing::warn!(
            idp = self.config.identity_provider().entity_id(),
            reasons = ?err.reasons(),
            error = %err,
            "SAML exchange failed"
        );
        err
    }
}

/// Parses a caller-supplied return URL.
///
/// The URL must be absolute, name a host and carry an explicit path
/// (`https://host/` is accepted, `https://host` is not).
fn validate_return_url(raw: &str) -> SamlResult<Url> {
    let invalid = || SamlError::InvalidUrl(raw.to_string());

    if raw.is_empty() || raw.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let url = Url::parse(raw).map_err(|_| invalid())?;
    if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }
    if !has_explicit_path(raw) {
        return Err(invalid());
    }
    Ok(url)
}

/// The url crate normalises an empty path to `/`, so check the raw text.
fn has_explicit_path(raw: &str) -> bool {
    let Some((_, rest)) = raw.split_once("://") else {
        return false;
    };
    rest.find(['/', '?', '#'])
        .is_some_and(|i| rest.as_bytes()[i] == b'/')
}
