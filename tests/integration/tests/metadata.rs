//! SP metadata integration tests.

use chrono::{TimeZone, Utc};
use saml_sp::engine::testing::{EngineCall, ScriptedEngine};
use saml_sp::{
    Contact, ContactCollection, ContactType, MetadataBuilder, MetadataOptions, Organization,
    OrganizationTranslation,
};

use crate::common;

fn options() -> anyhow::Result<MetadataOptions> {
    let valid_until = Utc
        .with_ymd_and_hms(2031, 6, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid timestamp"))?;
    Ok(MetadataOptions::default().with_valid_until(valid_until))
}

#[test]
fn test_signed_metadata() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    let xml = client.service_provider_metadata(&options()?)?;

    assert!(xml.contains("<md:EntityDescriptor"));
    assert!(xml.contains(&format!("entityID=\"{}\"", common::SP_ENTITY_ID)));
    assert!(xml.contains("validUntil=\"2031-06-01T12:00:00Z\""));
    assert!(xml.contains("<ds:Signature"));
    assert!(xml.contains("<md:KeyDescriptor use=\"signing\">"));
    assert!(xml.contains("<md:KeyDescriptor use=\"encryption\">"));
    assert!(xml.contains("MIIBszCCAVmgAwIBAgIUYXBwLmV4YW1wbGUuY29t"));
    assert!(!xml.contains("BEGIN CERTIFICATE"));
    assert!(xml.contains("<md:RequestedAttribute Name=\"groups\" isRequired=\"false\"/>"));
    assert_eq!(
        client.engine().calls().last(),
        Some(&EngineCall::SignMetadata)
    );

    Ok(())
}

#[test]
fn test_unsigned_metadata_skips_engine() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    let xml = client.service_provider_metadata(&options()?.with_sign(false))?;

    assert!(!xml.contains("Signature"));
    assert!(!client
        .engine()
        .calls()
        .iter()
        .any(|call| *call == EngineCall::SignMetadata));

    Ok(())
}

#[test]
fn test_metadata_with_contacts_and_organization() -> anyhow::Result<()> {
    let mut contacts = ContactCollection::new();
    contacts.insert(Contact::technical("Ops", "ops@example.com"));
    contacts.insert(Contact::support("Help Desk", "help@example.com"));
    let replaced = contacts.insert(Contact::technical("Platform", "platform@example.com"));
    assert!(replaced.is_some());

    let organization = Organization::new([
        OrganizationTranslation::new("Example", "Example Ltd", "https://example.com"),
        OrganizationTranslation::new("Beispiel", "Beispiel GmbH", "https://example.de")
            .with_language("de"),
    ])?;

    let xml = MetadataBuilder::new(common::saml_config()?.service_provider()).build(
        &options()?
            .with_contacts(contacts)
            .with_organization(organization),
    )?;

    assert!(xml.contains("<md:OrganizationName xml:lang=\"de\">Beispiel</md:OrganizationName>"));
    assert!(xml.contains("<md:OrganizationURL xml:lang=\"en\">https://example.com</md:OrganizationURL>"));
    assert_eq!(xml.matches("<md:ContactPerson").count(), 2);
    assert!(!xml.contains("ops@example.com"));
    let technical = xml
        .find(&format!("contactType=\"{}\"", ContactType::Technical.as_str()))
        .ok_or_else(|| anyhow::anyhow!("missing technical contact"))?;
    let support = xml
        .find("contactType=\"support\"")
        .ok_or_else(|| anyhow::anyhow!("missing support contact"))?;
    assert!(technical < support, "replaced contact keeps its slot");

    Ok(())
}

#[test]
fn test_metadata_is_stable() -> anyhow::Result<()> {
    let config = common::saml_config()?;
    let builder = MetadataBuilder::new(config.service_provider());
    let options = options()?.with_sign(false);

    assert_eq!(builder.build(&options)?, builder.build(&options)?);
    assert_eq!(saml_sp::metadata::normalize_xml(&builder.build(&options)?)?, builder.build(&options)?);

    Ok(())
}
