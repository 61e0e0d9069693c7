//! SAML 2.0 service provider configuration and session lifecycle.
//!
//! This crate sits in front of a SAML protocol engine. It provides:
//!
//! - **Typed configuration** - SP and IdP descriptors whose invariants are
//!   checked at construction, loadable from TOML
//! - **Engine settings** - a deterministic settings document for the engine
//! - **Login and logout** - an [`AuthClient`] that turns the engine's
//!   per-call results into redirects, sessions and typed errors
//! - **SP metadata** - metadata generation, optionally signed by the engine
//!
//! XML signatures, encryption and binding transport stay inside the engine,
//! which is reached through the [`SamlEngine`] trait.
//!
//! # Architecture
//!
//! - [`types`] - SAML constants and descriptor value types
//! - [`config`] - SP/IdP configuration and the engine settings document
//! - [`engine`] - the engine interface
//! - [`client`] - the authentication session client
//! - [`metadata`] - SP metadata generation
//! - [`error`] - error types
//!
//! # Example
//!
//! ```rust,ignore
//! use saml_sp::{AuthClient, IdentityProviderConfig, SamlConfig, ServiceProviderConfig};
//!
//! let sp = ServiceProviderConfig::new(
//!     "https://app.example.com",
//!     "App",
//!     "Example application",
//!     "https://app.example.com/saml/login",
//!     "https://app.example.com/saml/logout",
//!     sp_cert,
//!     sp_key,
//! );
//! let idp = IdentityProviderConfig::new(
//!     "https://idp.example.com",
//!     "https://idp.example.com/sso",
//!     "https://idp.example.com/slo",
//!     [idp_cert],
//! )?;
//!
//! let mut client = AuthClient::new(SamlConfig::new(sp, idp), engine)?;
//! let redirect = client.initiate_login("https://app.example.com/dashboard")?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod metadata;
pub mod types;

pub use client::{AuthClient, ExchangeState, RedirectDirective};
pub use config::{
    EngineSettings, IdentityProviderConfig, IdpCertificates, SamlConfig, ServiceProviderConfig,
};
pub use engine::{
    AssertionData, EngineError, EngineResult, LoginOptions, LogoutOptions, ResponseOutcome,
    SamlEngine,
};
pub use error::{ConfigError, SamlError, SamlResult};
pub use metadata::{MetadataBuilder, MetadataOptions};
pub use types::*;
