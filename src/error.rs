//! Error types shared across the crate.
//!
//! Every fallible operation returns [`Result`], so callers can propagate
//! failures with `?` up to the command line, where they are printed and the
//! process exits. The variants mirror the failure classes of the tool:
//!
//! - **Configuration** problems (missing env file or variables, no action
//!   requested, unknown origin) are raised before any network call.
//! - **Validation** problems (a backup without any uploadable row) are raised
//!   before anything is written to Spotify.
//! - **Upstream** problems (HTTP, authentication, malformed references) are
//!   passed through untouched. Nothing is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("invalid playlist reference: {0}")]
    InvalidReference(String),

    /// The API returned an item without a track object, e.g. a track that has
    /// been removed from the catalogue.
    #[error("playlist '{playlist}' has no track at position {position}")]
    UnavailableTrack { playlist: String, position: usize },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
