//! Configuration management for the playlist backup tool.
//!
//! Two kinds of configuration exist:
//!
//! 1. **Credentials** are read from an env file (`.env` by default). The file
//!    must exist and define the Spotify client id, secret and redirect URI.
//!    The Spotify endpoints may be overridden there as well.
//! 2. **Settings** describe one invocation: which playlists to back up, which
//!    backup to upload and where files live. They are built by the command line
//!    and handed to [`crate::cli::run`].

use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{
    Error, Result,
    source::{Origin, PlaylistRef},
};

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_CACHE_PATH: &str = ".cache-playlists";
pub const DEFAULT_EXPORT_DIR: &str = "exports";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scopes needed to read playlists and the liked songs.
pub const READ_SCOPE: &str = "playlist-read-private playlist-read-collaborative user-library-read";

/// Scopes needed to list, create and fill playlists.
pub const WRITE_SCOPE: &str = "playlist-read-private playlist-modify-private playlist-modify-public";

/// Loads variables from the env file at `path` into the process environment.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file does not exist or cannot be parsed.
pub fn load_env(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(Error::Config(format!(
            "Environment Variables not found in {}",
            path.display()
        )));
    }

    dotenv::from_path(path).map_err(|e| {
        Error::Config(format!("Cannot load environment from {}: {}", path.display(), e))
    })
}

/// Spotify application credentials and endpoints.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
}

impl Credentials {
    /// Reads the credentials from the process environment.
    ///
    /// `SPOTIPY_CLIENT_ID`, `SPOTIPY_CLIENT_SECRET` and `SPOTIPY_REDIRECT_URI`
    /// are required. `SPOTIFY_API_URL`, `SPOTIFY_API_AUTH_URL` and
    /// `SPOTIFY_API_TOKEN_URL` fall back to the public Spotify endpoints.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: required("SPOTIPY_CLIENT_ID")?,
            client_secret: required("SPOTIPY_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIPY_REDIRECT_URI")?,
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
        })
    }
}

fn required(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Execution parameters of one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub origin: Origin,
    /// Playlists to back up, in output order. Empty means no backup.
    pub save: Vec<PlaylistRef>,
    /// Backup file to upload as a new playlist.
    pub upload_path: Option<PathBuf>,
    /// Name of the uploaded playlist; defaults to `Backup_<DD_MM_YYYY>`.
    pub upload_name: Option<String>,
    pub env_path: PathBuf,
    pub cache_path: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: Origin::default(),
            save: Vec::new(),
            upload_path: None,
            upload_name: None,
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

/// The actions requested by a [`Settings`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actions {
    pub backup: bool,
    pub upload: bool,
}

impl Actions {
    /// Space separated scope covering every requested action.
    pub fn scope(&self) -> String {
        let mut scopes: Vec<&str> = Vec::new();
        let requested = [(self.backup, READ_SCOPE), (self.upload, WRITE_SCOPE)];
        for scope in requested
            .iter()
            .filter(|(wanted, _)| *wanted)
            .flat_map(|(_, scope)| scope.split_whitespace())
        {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
        scopes.join(" ")
    }
}

impl Settings {
    /// Determines what to do.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if neither a playlist to save nor a backup
    /// to upload is given.
    pub fn actions(&self) -> Result<Actions> {
        let actions = Actions {
            backup: !self.save.is_empty(),
            upload: self.upload_path.is_some(),
        };

        if !actions.backup && !actions.upload {
            return Err(Error::Config(
                "Neither a playlist to save nor a backup to upload was given, so no action can be taken"
                    .to_string(),
            ));
        }

        Ok(actions)
    }
}
