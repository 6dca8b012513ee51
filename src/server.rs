use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use reqwest::Url;
use tokio::sync::Mutex;

use crate::{Error, Result, api, types::PendingAuth};

/// Serves the OAuth callback on the host, port and path of `redirect_uri`.
///
/// Runs until the task is aborted.
pub async fn start_api_server(redirect_uri: Url, state: Arc<Mutex<PendingAuth>>) -> Result<()> {
    let host = redirect_uri
        .host_str()
        .ok_or_else(|| Error::Config(format!("Redirect URI {} has no host", redirect_uri)))?
        .to_string();
    let port = redirect_uri.port_or_known_default().unwrap_or(80);

    let app = Router::new().route(
        redirect_uri.path(),
        get(api::callback).layer(Extension(state)),
    );

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
