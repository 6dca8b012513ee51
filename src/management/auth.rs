use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Result, config::Credentials, spotify, types::Token, utils};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Owns the OAuth token and its cache file.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: impl Into<PathBuf>) -> Self {
        TokenManager {
            token,
            path: path.into(),
        }
    }

    /// Loads the token cached at `path`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self::new(token, path))
    }

    pub async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Whether the cached token was granted every scope in `scope`.
    pub fn covers(&self, scope: &str) -> bool {
        utils::scope_covers(&self.token.scope, scope)
    }

    /// Returns an access token, refreshing and re-persisting it first if it
    /// is about to expire.
    pub async fn get_valid_token(&mut self, credentials: &Credentials) -> Result<String> {
        if self.is_expired() {
            let mut new_token =
                spotify::auth::refresh_token(credentials, &self.token.refresh_token).await?;
            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            if new_token.scope.is_empty() {
                new_token.scope = self.token.scope.clone();
            }
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
