//! Logout exchange integration tests.

use saml_sp::engine::testing::{EngineCall, ScriptedEngine};
use saml_sp::{EngineError, ExchangeState, LogoutOptions, NameIdFormat, ResponseOutcome, SamlError};

use crate::common::{self, IDP_SLO_URL};

#[test]
fn test_logout_redirects_to_idp_slo() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    let redirect = client.initiate_logout("https://app.example.com/signed-out")?;

    assert!(redirect.location.starts_with(IDP_SLO_URL));
    assert_eq!(client.state(), ExchangeState::LogoutRequested);

    Ok(())
}

#[test]
fn test_logout_rejects_url_without_path() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    let err = client
        .initiate_logout("https://app.example.com")
        .expect_err("URL without a path must be rejected");

    assert!(matches!(err, SamlError::InvalidUrl(ref url) if url == "https://app.example.com"));
    assert_eq!(client.state(), ExchangeState::Idle);

    Ok(())
}

#[test]
fn test_logout_for_authenticated_subject() -> anyhow::Result<()> {
    let engine = ScriptedEngine::new()
        .with_response(Ok(ResponseOutcome::Authenticated(common::assertion())));
    let mut client = common::client(engine)?;
    let session = client.handle_login_response("PHNhbWxwOlJlc3BvbnNlLz4=")?;

    let options = LogoutOptions {
        name_id: Some(session.name_id().to_string()),
        session_index: Some(session.session_index().to_string()),
        name_id_format: Some(NameIdFormat::EmailAddress),
    };
    client.initiate_logout_with("https://app.example.com/signed-out", &options)?;

    let sent = client
        .engine()
        .calls()
        .iter()
        .find_map(|call| match call {
            EngineCall::Logout { options, .. } => Some(options.clone()),
            _ => None,
        })
        .ok_or_else(|| anyhow::anyhow!("no logout call recorded"))?;
    assert_eq!(sent.session_index.as_deref(), Some("_7e3f9a1c-session"));
    assert_eq!(sent.name_id_format, Some(NameIdFormat::EmailAddress));

    Ok(())
}

#[test]
fn test_logout_response_returns_idp_target() -> anyhow::Result<()> {
    let target = "https://idp.example.com/realms/main/logged-out";
    let mut client =
        common::client(ScriptedEngine::new().with_slo(Ok(Some(target.to_string()))))?;

    assert_eq!(client.handle_logout_response("fZJNT8MwDIbv")?, target);
    assert_eq!(client.state(), ExchangeState::LoggedOut);

    Ok(())
}

#[test]
fn test_logout_response_without_target_is_empty() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new().with_slo(Ok(None)))?;

    assert_eq!(client.handle_logout_response("fZJNT8MwDIbv")?, "");

    Ok(())
}

#[test]
fn test_rejected_logout_response() -> anyhow::Result<()> {
    let mut client = common::client(
        ScriptedEngine::new().with_slo(Err(EngineError::rejected("invalid_logout_response"))),
    )?;

    let err = client
        .handle_logout_response("fZJNT8MwDIbv")
        .expect_err("rejected logout response must fail");

    assert!(matches!(err, SamlError::Validation { .. }));
    assert_eq!(err.reasons(), ["invalid_logout_response".to_string()]);
    assert_eq!(client.state(), ExchangeState::Failed);

    Ok(())
}
