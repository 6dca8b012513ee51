use std::{path::Path, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Error, Result,
    config::{self, Credentials},
    info,
    management::TokenManager,
    server::start_api_server,
    spotify::SpotifySession,
    success,
    types::{PendingAuth, Token, TokenResponse},
    utils, warning,
};

/// How long to wait for the user to finish the consent flow.
const MAX_WAIT: Duration = Duration::from_secs(120);

/// Obtains an authenticated session bound to `scope`.
///
/// Loads the env file at `env_path` and reads the credentials from it. A
/// token cached at `cache_path` is reused if it was granted every requested
/// scope; otherwise the interactive consent flow runs and the new token is
/// written to the cache.
///
/// # Errors
///
/// - [`Error::Config`] if the env file or a required variable is missing
/// - [`Error::Auth`] if the consent flow fails or times out
pub async fn get_credentials(
    env_path: &Path,
    cache_path: &Path,
    scope: &str,
) -> Result<SpotifySession> {
    config::load_env(env_path)?;
    let credentials = Credentials::from_env()?;

    let tokens = match TokenManager::load(cache_path).await {
        Ok(tokens) if tokens.covers(scope) => tokens,
        Ok(_) => {
            info!("Cached token lacks the requested scope, asking for consent again");
            authorize(&credentials, cache_path, scope).await?
        }
        Err(_) => authorize(&credentials, cache_path, scope).await?,
    };

    Ok(SpotifySession::new(credentials, tokens))
}

/// Runs the authorization code flow and persists the resulting token.
///
/// A local callback server is bound to the redirect URI and the consent page
/// is opened in the browser. If no browser can be opened, the URL is printed
/// for the user to visit manually.
pub async fn authorize(
    credentials: &Credentials,
    cache_path: &Path,
    scope: &str,
) -> Result<TokenManager> {
    let state = utils::generate_state();
    let redirect_uri = Url::parse(&credentials.redirect_uri)
        .map_err(|e| Error::Config(format!("Invalid redirect URI: {}", e)))?;

    let shared_state = Arc::new(Mutex::new(PendingAuth {
        state: state.clone(),
        credentials: credentials.clone(),
        token: None,
        error: None,
    }));

    let auth_url = Url::parse_with_params(
        &credentials.auth_url,
        &[
            ("client_id", credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("scope", scope),
            ("state", state.as_str()),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| Error::Config(format!("Invalid authorization URL: {}", e)))?;

    let server = tokio::spawn(start_api_server(redirect_uri, Arc::clone(&shared_state)));

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(&shared_state, &server).await;
    server.abort();

    let token_manager = TokenManager::new(token?, cache_path);
    token_manager.persist().await?;
    success!("Authentication successful!");
    Ok(token_manager)
}

async fn wait_for_token(
    shared_state: &Arc<Mutex<PendingAuth>>,
    server: &tokio::task::JoinHandle<Result<()>>,
) -> Result<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < MAX_WAIT {
        {
            let pending = shared_state.lock().await;
            if let Some(token) = &pending.token {
                return Ok(token.clone());
            }
            if let Some(error) = &pending.error {
                return Err(Error::Auth(error.clone()));
            }
        }

        if server.is_finished() {
            return Err(Error::Auth(
                "Callback server stopped before a token was received".to_string(),
            ));
        }

        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    Err(Error::Auth("Authentication timed out".to_string()))
}

/// Exchanges an authorization code for a token.
pub async fn exchange_code(credentials: &Credentials, code: &str) -> Result<Token> {
    request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ],
    )
    .await
}

/// Obtains a fresh access token with a refresh token.
///
/// The refresh response may omit the refresh token and scope, in which case
/// they are returned empty; [`TokenManager`] keeps the previous values then.
pub async fn refresh_token(credentials: &Credentials, refresh_token: &str) -> Result<Token> {
    request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(credentials: &Credentials, form: &[(&str, &str)]) -> Result<Token> {
    let client = Client::new();
    let response = client
        .post(&credentials.token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(form)
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = response.json().await?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
