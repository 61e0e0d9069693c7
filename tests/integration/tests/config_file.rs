//! Configuration file integration tests.

use std::fs;

use saml_sp::engine::testing::ScriptedEngine;
use saml_sp::{AuthClient, ConfigError, IdpCertificates, NameIdFormat, SamlConfig};

use crate::common::{self, IDP_CERT, SP_CERT, SP_KEY};

const CONFIG: &str = r#"
strict = true

[service_provider]
entity_id = "https://app.example.com/saml"
display_name = "Example App"
description = "Example application"
login_handler_url = "https://app.example.com/saml/acs"
logout_handler_url = "https://app.example.com/saml/sls"
name_id_format = "urn:oasis:names:tc:SAML:2.0:nameid-format:persistent"
public_cert_file = "certs/sp.crt"
private_key_file = "certs/sp.key"

[[service_provider.requested_attributes]]
name = "urn:oid:0.9.2342.19200300.100.1.3"
is_required = true
friendly_name = "mail"

[identity_provider]
entity_id = "https://idp.example.com/realms/main"
auth_url = "https://idp.example.com/realms/main/protocol/saml"
logout_url = "https://idp.example.com/realms/main/protocol/saml/logout"
signing_certificates = ["INLINE-SIGNING"]
signing_certificate_files = ["certs/idp.crt"]
"#;

fn write_config_dir(config: &str) -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("certs"))?;
    fs::write(dir.path().join("certs/sp.crt"), SP_CERT)?;
    fs::write(dir.path().join("certs/sp.key"), SP_KEY)?;
    fs::write(dir.path().join("certs/idp.crt"), IDP_CERT)?;
    fs::write(dir.path().join("saml.toml"), config)?;
    Ok(dir)
}

#[test]
fn test_load_resolves_files_relative_to_config() -> anyhow::Result<()> {
    common::init_tracing();
    let dir = write_config_dir(CONFIG)?;

    let config = SamlConfig::load(dir.path().join("saml.toml"))?;

    let sp = config.service_provider();
    assert_eq!(sp.public_cert(), SP_CERT);
    assert_eq!(sp.private_key(), SP_KEY);
    assert_eq!(sp.name_id_format(), NameIdFormat::Persistent);
    assert_eq!(sp.requested_attributes().len(), 1);

    let idp = config.identity_provider();
    assert_eq!(
        idp.signing_certificates(),
        ["INLINE-SIGNING".to_string(), IDP_CERT.to_string()]
    );

    Ok(())
}

#[test]
fn test_loaded_config_drives_client() -> anyhow::Result<()> {
    let dir = write_config_dir(CONFIG)?;
    let config = SamlConfig::load(dir.path().join("saml.toml"))?;

    let client = AuthClient::new(config, ScriptedEngine::new())?;
    let settings = client
        .engine()
        .settings()
        .ok_or_else(|| anyhow::anyhow!("engine was not initialised"))?;

    assert!(matches!(
        &settings.idp.certificates,
        IdpCertificates::Multi { signing, .. } if signing.len() == 2
    ));
    assert_eq!(settings.sp.name_id_format, NameIdFormat::Persistent);

    Ok(())
}

#[test]
fn test_missing_file_reports_path() -> anyhow::Result<()> {
    let dir = write_config_dir(CONFIG)?;
    fs::remove_file(dir.path().join("certs/idp.crt"))?;

    let err = SamlConfig::load(dir.path().join("saml.toml"))
        .expect_err("missing certificate file must fail");

    match err {
        ConfigError::Io { path, .. } => assert!(path.ends_with("certs/idp.crt")),
        other => anyhow::bail!("unexpected error: {other}"),
    }

    Ok(())
}

#[test]
fn test_missing_config_file() {
    let err = SamlConfig::load("/nonexistent/saml.toml").expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_unknown_attribute_name_format_rejected() -> anyhow::Result<()> {
    let config = CONFIG.replace(
        "friendly_name = \"mail\"",
        "friendly_name = \"mail\"\nname_format = \"urn:example:made-up\"",
    );
    let dir = write_config_dir(&config)?;

    let err = SamlConfig::load(dir.path().join("saml.toml"))
        .expect_err("unknown name format must fail");

    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("urn:example:made-up"));

    Ok(())
}

#[test]
fn test_no_signing_certificates_rejected() -> anyhow::Result<()> {
    let config = CONFIG
        .replace("signing_certificates = [\"INLINE-SIGNING\"]\n", "")
        .replace("signing_certificate_files = [\"certs/idp.crt\"]\n", "");
    let dir = write_config_dir(&config)?;

    let err = SamlConfig::load(dir.path().join("saml.toml"))
        .expect_err("IdP without signing certificates must fail");

    assert!(matches!(err, ConfigError::NoSigningCertificate));

    Ok(())
}
