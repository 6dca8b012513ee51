mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query};
use common::{credentials, token_endpoint};
use playlist_backup::{api::callback, config::Credentials, types::PendingAuth};
use serde_json::json;
use tokio::sync::Mutex;

fn pending(credentials: Credentials) -> Arc<Mutex<PendingAuth>> {
    Arc::new(Mutex::new(PendingAuth {
        state: "expected-state".to_string(),
        credentials,
        token: None,
        error: None,
    }))
}

fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
    Query(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[tokio::test]
async fn test_denied_consent_is_reported() {
    let state = pending(credentials());

    callback(
        query(&[("error", "access_denied"), ("state", "expected-state")]),
        Extension(Arc::clone(&state)),
    )
    .await;

    let pending = state.lock().await;
    assert!(pending.token.is_none());
    let error = pending.error.as_deref().unwrap();
    assert!(error.contains("access_denied"));
}

#[tokio::test]
async fn test_state_mismatch_is_rejected_without_exchange() {
    let (credentials, requests) =
        token_endpoint(json!({"access_token": "new", "expires_in": 3600})).await;
    let state = pending(credentials);

    callback(
        query(&[("code", "abc"), ("state", "forged-state")]),
        Extension(Arc::clone(&state)),
    )
    .await;

    let pending = state.lock().await;
    assert!(pending.token.is_none());
    assert!(pending.error.as_deref().unwrap().contains("State mismatch"));
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_code_is_reported() {
    let state = pending(credentials());

    callback(
        query(&[("state", "expected-state")]),
        Extension(Arc::clone(&state)),
    )
    .await;

    let pending = state.lock().await;
    assert!(pending.token.is_none());
    assert!(pending.error.as_deref().unwrap().contains("Missing authorization code"));
}

#[tokio::test]
async fn test_code_is_exchanged_for_token() {
    let (credentials, requests) = token_endpoint(json!({
        "access_token": "granted",
        "refresh_token": "refresh",
        "scope": "user-library-read",
        "expires_in": 3600
    }))
    .await;
    let state = pending(credentials);

    callback(
        query(&[("code", "abc"), ("state", "expected-state")]),
        Extension(Arc::clone(&state)),
    )
    .await;

    let pending = state.lock().await;
    assert!(pending.error.is_none());
    let token = pending.token.as_ref().unwrap();
    assert_eq!(token.access_token, "granted");
    assert_eq!(token.refresh_token, "refresh");

    let form = &requests.lock().unwrap()[0];
    assert_eq!(form["grant_type"], "authorization_code");
    assert_eq!(form["code"], "abc");
    assert_eq!(form["redirect_uri"], "http://127.0.0.1:8888/callback");
}
