//! Engine settings document integration tests.

use saml_sp::engine::testing::ScriptedEngine;
use saml_sp::{AuthClient, IdentityProviderConfig, SamlConfig};

use crate::common::{self, IDP_CERT, IDP_ENTITY_ID, IDP_SLO_URL, IDP_SSO_URL};

const REDIRECT: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-Redirect";
const POST: &str = "urn:oasis:names:tc:SAML:2.0:bindings:HTTP-POST";

#[test]
fn test_document_shape() -> anyhow::Result<()> {
    let document: serde_json::Value = serde_json::from_str(&common::saml_config()?.to_json()?)?;

    assert_eq!(document["strict"], true);
    assert_eq!(document["debug"], false);
    assert!(document["baseurl"].is_null());

    let sp = &document["sp"];
    assert_eq!(sp["entityId"], common::SP_ENTITY_ID);
    assert_eq!(sp["assertionConsumerService"]["url"], common::SP_LOGIN_URL);
    assert_eq!(sp["assertionConsumerService"]["binding"], POST);
    assert_eq!(sp["singleLogoutService"]["url"], common::SP_LOGOUT_URL);
    assert_eq!(sp["singleLogoutService"]["binding"], REDIRECT);
    assert_eq!(sp["x509cert"], common::SP_CERT);
    assert_eq!(sp["privateKey"], common::SP_KEY);

    let requested = sp["attributeConsumingService"]["requestedAttributes"]
        .as_array()
        .ok_or_else(|| anyhow::anyhow!("requestedAttributes should be an array"))?;
    assert_eq!(requested.len(), 2);
    assert_eq!(requested[0]["friendlyName"], "mail");
    assert_eq!(requested[1]["name"], "groups");
    assert_eq!(requested[1]["isRequired"], false);
    assert!(requested[1].get("friendlyName").is_none());
    assert_eq!(sp["attributeConsumingService"]["serviceName"], "Example App");

    let idp = &document["idp"];
    assert_eq!(idp["entityId"], IDP_ENTITY_ID);
    assert_eq!(idp["singleSignOnService"]["binding"], REDIRECT);
    assert_eq!(idp["singleLogoutService"]["url"], IDP_SLO_URL);
    assert!(idp["singleLogoutService"].get("responseUrl").is_none());
    assert_eq!(idp["x509cert"], IDP_CERT);
    assert!(idp.get("x509certMulti").is_none());

    Ok(())
}

#[test]
fn test_certificate_rollover_uses_multi_form() -> anyhow::Result<()> {
    let idp = IdentityProviderConfig::new(
        IDP_ENTITY_ID,
        IDP_SSO_URL,
        IDP_SLO_URL,
        ["OLD-SIGNING", "NEW-SIGNING"],
    )?
    .with_logout_response_url("https://idp.example.com/realms/main/logout/response");
    let config = SamlConfig::new(common::service_provider(), idp);

    let document = serde_json::to_value(config.to_settings())?;
    let idp = &document["idp"];

    assert!(idp.get("x509cert").is_none());
    assert_eq!(
        idp["x509certMulti"]["signing"],
        serde_json::json!(["OLD-SIGNING", "NEW-SIGNING"])
    );
    assert_eq!(idp["x509certMulti"]["encryption"], serde_json::json!([]));
    assert_eq!(
        idp["singleLogoutService"]["responseUrl"],
        "https://idp.example.com/realms/main/logout/response"
    );

    Ok(())
}

#[test]
fn test_no_requested_attributes_omits_block() -> anyhow::Result<()> {
    let sp = saml_sp::ServiceProviderConfig::new(
        common::SP_ENTITY_ID,
        "Example App",
        "Example application",
        common::SP_LOGIN_URL,
        common::SP_LOGOUT_URL,
        common::SP_CERT,
        common::SP_KEY,
    );
    let config = SamlConfig::new(sp, common::identity_provider()?);

    let document = serde_json::to_value(config.to_settings())?;
    assert!(document["sp"].get("attributeConsumingService").is_none());

    Ok(())
}

#[test]
fn test_document_is_deterministic() -> anyhow::Result<()> {
    let config = common::saml_config()?;

    let first = config.to_json()?;
    let second = config.to_json()?;
    assert_eq!(first, second);
    assert_eq!(config.to_settings().to_json_pretty()?, config.to_settings().to_json_pretty()?);

    Ok(())
}

#[test]
fn test_engine_receives_document() -> anyhow::Result<()> {
    let config = common::saml_config()?.with_debug(true);
    let client = AuthClient::new(config.clone(), ScriptedEngine::new())?;

    assert_eq!(client.engine().settings(), Some(&config.to_settings()));
    assert!(client.config().debug());

    Ok(())
}
