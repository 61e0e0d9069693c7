//! Integration test harness for `saml-sp`; the suites live under `tests/`.
