//! Login exchange integration tests.

use saml_sp::engine::testing::{EngineCall, ScriptedEngine};
use saml_sp::{
    EngineError, ExchangeState, LoginOptions, ResponseOutcome, SamlBinding, SamlError,
};

use crate::common::{self, IDP_SSO_URL};

#[test]
fn test_login_redirects_to_idp_sso() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    let redirect = client.initiate_login("https://app.example.com/dashboard")?;

    assert!(
        redirect.location.starts_with(IDP_SSO_URL),
        "redirect should target the IdP SSO endpoint, got {}",
        redirect.location
    );
    assert!(redirect
        .location
        .contains("RelayState=https%3A%2F%2Fapp.example.com%2Fdashboard"));
    assert_eq!(redirect.binding, SamlBinding::HttpRedirect);
    assert_eq!(redirect.method(), "GET");
    assert_eq!(client.state(), ExchangeState::LoginRequested);

    Ok(())
}

#[test]
fn test_login_rejects_malformed_return_urls() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;

    for url in ["not a url", "https://app.example.com", "app.example.com/dashboard"] {
        let err = client
            .initiate_login(url)
            .expect_err("malformed URL must be rejected");
        assert!(matches!(err, SamlError::InvalidUrl(_)), "{url}: {err:?}");
        assert_eq!(err.http_status(), 400);
    }

    assert_eq!(
        client.engine().calls(),
        [EngineCall::Initialize],
        "the engine must not be called for invalid URLs"
    );

    Ok(())
}

#[test]
fn test_login_forwards_request_options() -> anyhow::Result<()> {
    let mut client = common::client(ScriptedEngine::new())?;
    let options = LoginOptions {
        force_authn: true,
        is_passive: false,
        set_name_id_policy: true,
    };

    client.initiate_login_with("https://app.example.com/admin", &options)?;

    match &client.engine().calls()[1] {
        EngineCall::Login { options: sent, .. } => assert!(sent.force_authn),
        other => panic!("expected a login call, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_authenticated_response_produces_session() -> anyhow::Result<()> {
    let engine = ScriptedEngine::new()
        .with_response(Ok(ResponseOutcome::Authenticated(common::assertion())));
    let mut client = common::client(engine)?;

    let session = client.handle_login_response("PHNhbWxwOlJlc3BvbnNlLz4=")?;

    let expected = common::assertion();
    assert_eq!(session.name_id(), expected.name_id);
    assert_eq!(session.session_index(), expected.session_index);
    assert_eq!(session.user_attributes(), &expected.attributes);
    assert_eq!(
        session.first_attribute("urn:oid:0.9.2342.19200300.100.1.3"),
        Some("jane.doe@example.com")
    );
    assert_eq!(
        session.attribute("groups"),
        Some(&["engineering".to_string(), "on-call".to_string()][..])
    );
    assert_eq!(client.state(), ExchangeState::Authenticated);

    let json = serde_json::to_value(&session)?;
    assert_eq!(json["session_index"], "_7e3f9a1c-session");

    Ok(())
}

#[test]
fn test_rejected_response_reports_every_reason() -> anyhow::Result<()> {
    let engine = ScriptedEngine::new().with_response(Err(EngineError::Rejected {
        reasons: vec![
            "invalid_response".to_string(),
            "invalid_destination".to_string(),
        ],
        last_reason: Some("The response was received at the wrong endpoint".to_string()),
    }));
    let mut client = common::client(engine)?;

    let err = client
        .handle_login_response("PHNhbWxwOlJlc3BvbnNlLz4=")
        .expect_err("rejected response must fail");

    assert_eq!(err.reasons().len(), 2);
    assert!(err.to_string().contains("wrong endpoint"));
    assert_eq!(err.http_status(), 401);
    assert_eq!(client.state(), ExchangeState::Failed);

    Ok(())
}

#[test]
fn test_unauthenticated_response() -> anyhow::Result<()> {
    let engine = ScriptedEngine::new().with_response(Ok(ResponseOutcome::NotAuthenticated));
    let mut client = common::client(engine)?;

    let err = client
        .handle_login_response("PHNhbWxwOlJlc3BvbnNlLz4=")
        .expect_err("unauthenticated response must fail");

    assert!(matches!(err, SamlError::NotAuthenticated));
    assert!(err.is_client_error());

    Ok(())
}
