//! Attributes the SP asks the IdP to release.

use super::AttributeNameFormat;

/// An attribute requested from the IdP through the attribute consuming
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedAttribute {
    name: String,
    is_required: bool,
    friendly_name: Option<String>,
    name_format: Option<AttributeNameFormat>,
    attribute_values: Option<Vec<String>>,
}

impl RequestedAttribute {
    /// Creates a requested attribute.
    ///
    /// `name` is the formal attribute name, e.g.
    /// `urn:oid:0.9.2342.19200300.100.1.3`.
    #[must_use]
    pub fn new(name: impl Into<String>, is_required: bool) -> Self {
        Self {
            name: name.into(),
            is_required,
            friendly_name: None,
            name_format: None,
            attribute_values: None,
        }
    }

    /// Creates a required attribute.
    #[must_use]
    pub fn required(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Creates an optional attribute.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// Sets the friendly name (e.g. `mail`).
    #[must_use]
    pub fn with_friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = Some(friendly_name.into());
        self
    }

    /// Sets the name format.
    #[must_use]
    pub const fn with_name_format(mut self, name_format: AttributeNameFormat) -> Self {
        self.name_format = Some(name_format);
        self
    }

    /// Sets the expected attribute values.
    #[must_use]
    pub fn with_attribute_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attribute_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the formal attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the IdP must release this attribute.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.is_required
    }

    /// Returns the friendly name.
    #[must_use]
    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    /// Returns the name format.
    #[must_use]
    pub const fn name_format(&self) -> Option<AttributeNameFormat> {
        self.name_format
    }

    /// Returns the expected attribute values.
    #[must_use]
    pub fn attribute_values(&self) -> Option<&[String]> {
        self.attribute_values.as_deref()
    }
}
