//! The result of a successful login.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::AssertionData;

/// Snapshot of what the engine reported for an authenticated subject.
///
/// Built exactly once per successful login response. Turning it into an
/// application session is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedSession {
    user_attributes: BTreeMap<String, Vec<String>>,
    name_id: String,
    name_id_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_id_name_qualifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sp_name_qualifier: Option<String>,
    session_index: String,
}

impl AuthenticatedSession {
    /// Returns all released attributes.
    #[must_use]
    pub const fn user_attributes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.user_attributes
    }

    /// Returns the values of one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&[String]> {
        self.user_attributes.get(name).map(Vec::as_slice)
    }

    /// Returns the first value of one attribute.
    #[must_use]
    pub fn first_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the subject's name identifier.
    #[must_use]
    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    /// Returns the name identifier format URI.
    #[must_use]
    pub fn name_id_format(&self) -> &str {
        &self.name_id_format
    }

    /// Returns the `NameQualifier` of the name identifier.
    #[must_use]
    pub fn name_id_name_qualifier(&self) -> Option<&str> {
        self.name_id_name_qualifier.as_deref()
    }

    /// Returns the `SPNameQualifier` of the name identifier.
    #[must_use]
    pub fn sp_name_qualifier(&self) -> Option<&str> {
        self.sp_name_qualifier.as_deref()
    }

    /// Returns the IdP session index, needed for single logout.
    #[must_use]
    pub fn session_index(&self) -> &str {
        &self.session_index
    }
}

impl From<AssertionData> for AuthenticatedSession {
    fn from(data: AssertionData) -> Self {
        Self {
            user_attributes: data.attributes,
            name_id: data.name_id,
            name_id_format: data.name_id_format,
            name_id_name_qualifier: data.name_id_name_qualifier,
            sp_name_qualifier: data.sp_name_qualifier,
            session_index: data.session_index,
        }
    }
}
