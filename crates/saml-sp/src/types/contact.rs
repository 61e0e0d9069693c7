//! Metadata contact persons.

use super::{ContactType, DescriptorSet, Keyed};

/// A contact person published in the SP metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    contact_type: ContactType,
    name: String,
    email: String,
}

impl Contact {
    /// Creates a new contact.
    #[must_use]
    pub fn new(contact_type: ContactType, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            contact_type,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Creates a technical contact.
    #[must_use]
    pub fn technical(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(ContactType::Technical, name, email)
    }

    /// Creates a support contact.
    #[must_use]
    pub fn support(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(ContactType::Support, name, email)
    }

    /// Returns the contact type.
    #[must_use]
    pub const fn contact_type(&self) -> ContactType {
        self.contact_type
    }

    /// Returns the contact's given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Keyed for Contact {
    type Key = ContactType;

    fn key(&self) -> &ContactType {
        &self.contact_type
    }
}

/// Contacts keyed by type; a second contact of the same type replaces the
/// first.
pub type ContactCollection = DescriptorSet<Contact>;
