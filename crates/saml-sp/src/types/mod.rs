//! SAML value objects.
//!
//! This module contains the descriptors a service provider uses to describe
//! itself and its metadata, the closed sets of SAML constants, and the
//! result of a successful login.

mod collection;
mod constants;
mod contact;
mod organization;
mod requested_attribute;
mod session;

pub use collection::*;
pub use constants::*;
pub use contact::*;
pub use organization::*;
pub use requested_attribute::*;
pub use session::*;
