use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::PendingAuth, warning};

/// Receives the redirect of the Spotify consent page.
///
/// Checks the `state` parameter against the pending request and exchanges
/// the `code` for a token. The outcome is stored in the shared
/// [`PendingAuth`], where the waiting authorization flow picks it up.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<PendingAuth>>>,
) -> Html<&'static str> {
    let mut pending = shared_state.lock().await;

    if let Some(error) = params.get("error") {
        pending.error = Some(format!("Authorization denied: {}", error));
        return Html("<h4>Login failed.</h4>");
    }

    if params.get("state") != Some(&pending.state) {
        pending.error = Some("State mismatch in authorization callback".to_string());
        return Html("<h4>Login failed.</h4>");
    }

    let Some(code) = params.get("code") else {
        pending.error = Some("Missing authorization code in callback".to_string());
        return Html("<h4>Missing authorization code.</h4>");
    };

    match spotify::auth::exchange_code(&pending.credentials, code).await {
        Ok(token) => {
            pending.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.error = Some(e.to_string());
            Html("<h4>Login failed.</h4>")
        }
    }
}
