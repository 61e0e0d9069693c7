//! SP metadata generation.
//!
//! Builds the SAML 2.0 `md:EntityDescriptor` describing the service
//! provider, normalises its formatting and optionally has the engine sign
//! it.

use std::time::Duration;

use base64::Engine as _;
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::config::ServiceProviderConfig;
use crate::engine::SamlEngine;
use crate::error::{SamlError, SamlResult};
use crate::types::{
    ContactCollection, Organization, SamlBinding, DEFAULT_LANGUAGE, MD_NS, SAMLP_NS, SAML_NS,
    XMLDSIG_NS,
};

/// How long a metadata document stays valid when no `valid_until` is given.
pub const DEFAULT_VALIDITY_DAYS: i64 = 2;

/// Default `cacheDuration`: one week.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(604_800);

const VALID_UNTIL_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Options for metadata generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataOptions {
    /// Sign the document with the SP key.
    pub sign: bool,
    /// Value of `AuthnRequestsSigned`.
    pub authn_requests_signed: bool,
    /// Value of `WantAssertionsSigned`.
    pub want_assertions_signed: bool,
    /// Expiry of the document; `None` means two days from now.
    pub valid_until: Option<DateTime<Utc>>,
    /// `cacheDuration`, omitted when `None`.
    pub cache_duration: Option<Duration>,
    /// Contact people.
    pub contacts: ContactCollection,
    /// Organization behind the SP.
    pub organization: Option<Organization>,
}

impl Default for MetadataOptions {
    fn default() -> Self {
        Self {
            sign: true,
            authn_requests_signed: false,
            want_assertions_signed: false,
            valid_until: None,
            cache_duration: Some(DEFAULT_CACHE_DURATION),
            contacts: ContactCollection::new(),
            organization: None,
        }
    }
}

impl MetadataOptions {
    /// Sets whether the document is signed.
    #[must_use]
    pub const fn with_sign(mut self, sign: bool) -> Self {
        self.sign = sign;
        self
    }

    /// Sets a fixed expiry.
    #[must_use]
    pub const fn with_valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// Sets the contacts.
    #[must_use]
    pub fn with_contacts(mut self, contacts: ContactCollection) -> Self {
        self.contacts = contacts;
        self
    }

    /// Sets the organization.
    #[must_use]
    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organization = Some(organization);
        self
    }
}

/// Writes the metadata document for one service provider.
#[derive(Debug, Clone, Copy)]
pub struct MetadataBuilder<'a> {
    service_provider: &'a ServiceProviderConfig,
}

impl<'a> MetadataBuilder<'a> {
    /// Creates a builder for the given SP.
    #[must_use]
    pub const fn new(service_provider: &'a ServiceProviderConfig) -> Self {
        Self { service_provider }
    }

    /// Builds the unsigned, normalised document.
    ///
    /// `options.sign` is ignored; use [`generate`](Self::generate) to sign.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Metadata`] if the SP certificate is not valid
    /// base64 or the document cannot be written.
    pub fn build(&self, options: &MetadataOptions) -> SamlResult<String> {
        let certificate = certificate_body(self.service_provider.public_cert())?;
        let valid_until = options
            .valid_until
            .unwrap_or_else(|| Utc::now() + chrono::Duration::days(DEFAULT_VALIDITY_DAYS));

        let mut out = XmlOut::new();
        out.declaration()?;

        let valid_until = valid_until.format(VALID_UNTIL_FORMAT).to_string();
        let cache_duration = options
            .cache_duration
            .map(|duration| format!("PT{}S", duration.as_secs()));
        let mut entity = vec![
            ("xmlns:md", MD_NS),
            ("validUntil", valid_until.as_str()),
        ];
        if let Some(cache_duration) = &cache_duration {
            entity.push(("cacheDuration", cache_duration.as_str()));
        }
        entity.push(("entityID", self.service_provider.entity_id()));
        out.start("md:EntityDescriptor", &entity)?;

        self.write_sp_descriptor(&mut out, options, &certificate)?;
        if let Some(organization) = &options.organization {
            write_organization(&mut out, organization)?;
        }
        write_contacts(&mut out, &options.contacts)?;

        out.end("md:EntityDescriptor")?;
        normalize_xml(&out.finish()?)
    }

    /// Builds the document and, when `options.sign` is set, has the engine
    /// sign it with the SP key and certificate.
    ///
    /// # Errors
    ///
    /// Returns [`SamlError::Metadata`] if the document cannot be built, or
    /// [`SamlError::Engine`] if signing fails.
    pub fn generate<E: SamlEngine>(
        &self,
        engine: &mut E,
        options: &MetadataOptions,
    ) -> SamlResult<String> {
        let metadata = self.build(options)?;
        if !options.sign {
            return Ok(metadata);
        }

        let signed = engine.sign_metadata(
            &metadata,
            self.service_provider.private_key(),
            self.service_provider.public_cert(),
        )?;
        tracing::debug!(
            entity_id = self.service_provider.entity_id(),
            "signed SP metadata"
        );
        Ok(signed)
    }

    fn write_sp_descriptor(
        &self,
        out: &mut XmlOut,
        options: &MetadataOptions,
        certificate: &str,
    ) -> SamlResult<()> {
        let sp = self.service_provider;

        out.start(
            "md:SPSSODescriptor",
            &[
                ("AuthnRequestsSigned", bool_attr(options.authn_requests_signed)),
                ("WantAssertionsSigned", bool_attr(options.want_assertions_signed)),
                ("protocolSupportEnumeration", SAMLP_NS),
            ],
        )?;

        for usage in ["signing", "encryption"] {
            out.start("md:KeyDescriptor", &[("use", usage)])?;
            out.start("ds:KeyInfo", &[("xmlns:ds", XMLDSIG_NS)])?;
            out.start("ds:X509Data", &[])?;
            out.text_element("ds:X509Certificate", &[], certificate)?;
            out.end("ds:X509Data")?;
            out.end("ds:KeyInfo")?;
            out.end("md:KeyDescriptor")?;
        }

        out.empty(
            "md:SingleLogoutService",
            &[
                ("Binding", SamlBinding::HttpRedirect.uri()),
                ("Location", sp.logout_handler_url()),
            ],
        )?;
        out.text_element("md:NameIDFormat", &[], sp.name_id_format().uri())?;
        out.empty(
            "md:AssertionConsumerService",
            &[
                ("Binding", SamlBinding::HttpPost.uri()),
                ("Location", sp.login_handler_url()),
                ("index", "1"),
            ],
        )?;

        if !sp.requested_attributes().is_empty() {
            out.start("md:AttributeConsumingService", &[("index", "1")])?;
            out.text_element(
                "md:ServiceName",
                &[("xml:lang", DEFAULT_LANGUAGE)],
                sp.display_name(),
            )?;
            out.text_element(
                "md:ServiceDescription",
                &[("xml:lang", DEFAULT_LANGUAGE)],
                sp.description(),
            )?;
            for attribute in sp.requested_attributes() {
                let mut attrs = vec![("Name", attribute.name())];
                if let Some(name_format) = attribute.name_format() {
                    attrs.push(("NameFormat", name_format.uri()));
                }
                if let Some(friendly_name) = attribute.friendly_name() {
                    attrs.push(("FriendlyName", friendly_name));
                }
                attrs.push(("isRequired", bool_attr(attribute.is_required())));

                match attribute.attribute_values() {
                    Some(values) if !values.is_empty() => {
                        out.start("md:RequestedAttribute", &attrs)?;
                        for value in values {
                            out.text_element(
                                "saml:AttributeValue",
                                &[("xmlns:saml", SAML_NS)],
                                value,
                            )?;
                        }
                        out.end("md:RequestedAttribute")?;
                    }
                    _ => out.empty("md:RequestedAttribute", &attrs)?,
                }
            }
            out.end("md:AttributeConsumingService")?;
        }

        out.end("md:SPSSODescriptor")?;
        Ok(())
    }
}

fn write_organization(out: &mut XmlOut, organization: &Organization) -> SamlResult<()> {
    out.start("md:Organization", &[])?;
    for translation in organization.translations() {
        out.text_element(
            "md:OrganizationName",
            &[("xml:lang", translation.language_code())],
            translation.name(),
        )?;
    }
    for translation in organization.translations() {
        out.text_element(
            "md:OrganizationDisplayName",
            &[("xml:lang", translation.language_code())],
            translation.display_name(),
        )?;
    }
    for translation in organization.translations() {
        out.text_element(
            "md:OrganizationURL",
            &[("xml:lang", translation.language_code())],
            translation.url(),
        )?;
    }
    out.end("md:Organization")?;
    Ok(())
}

fn write_contacts(out: &mut XmlOut, contacts: &ContactCollection) -> SamlResult<()> {
    for contact in contacts {
        out.start(
            "md:ContactPerson",
            &[("contactType", contact.contact_type().as_str())],
        )?;
        out.text_element("md:GivenName", &[], contact.name())?;
        out.text_element("md:EmailAddress", &[], contact.email())?;
        out.end("md:ContactPerson")?;
    }
    Ok(())
}

const fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Extracts the base64 body of a PEM certificate.
///
/// Input without PEM armour is taken as the body itself.
fn certificate_body(pem: &str) -> SamlResult<String> {
    const BEGIN: &str = "-----BEGIN CERTIFICATE-----";
    const END: &str = "-----END CERTIFICATE-----";

    let body = match (pem.find(BEGIN), pem.find(END)) {
        (Some(start), Some(end)) if start + BEGIN.len() <= end => &pem[start + BEGIN.len()..end],
        _ => pem,
    };
    let body: String = body.chars().filter(|c| !c.is_whitespace()).collect();

    if body.is_empty()
        || base64::engine::general_purpose::STANDARD
            .decode(&body)
            .is_err()
    {
        return Err(SamlError::Metadata(
            "SP certificate is not valid base64".to_string(),
        ));
    }
    Ok(body)
}

/// Re-indents a document so equivalent inputs produce identical text.
///
/// Only whitespace between elements is dropped; text content is kept as is.
///
/// # Errors
///
/// Returns [`SamlError::Metadata`] if the input is not well-formed.
pub fn normalize_xml(xml: &str) -> SamlResult<String> {
    let mut reader = Reader::from_str(xml);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => {}
            event => writer.write_event(event)?,
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|e| SamlError::Metadata(e.to_string()))
}

/// Thin wrapper over the quick-xml writer for element-at-a-time output.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 4),
        }
    }

    fn declaration(&mut self) -> quick_xml::Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> quick_xml::Result<()> {
        self.writer.write_event(Event::Start(element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> quick_xml::Result<()> {
        self.writer.write_event(Event::Empty(element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> quick_xml::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn text_element(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        text: &str,
    ) -> quick_xml::Result<()> {
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> SamlResult<String> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| SamlError::Metadata(e.to_string()))
    }
}

fn element<'n>(name: &'n str, attrs: &[(&str, &str)]) -> BytesStart<'n> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    start
}
