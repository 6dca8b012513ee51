//! Spotify Playlist Backup Library
//!
//! This library backs up Spotify playlists (and the liked songs collection) to
//! CSV files and restores such a backup as a new private playlist. It includes
//! modules for the OAuth flow, the Spotify Web API, CSV backup handling and the
//! command-line orchestration tying them together.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Backup, upload and the orchestrating handler
//! - `config` - Environment file loading, credentials and execution settings
//! - `error` - Crate wide error type
//! - `management` - Token cache and CSV backup files
//! - `server` - Local HTTP server for OAuth callbacks
//! - `source` - Origins, playlist references and the track source capability
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_backup::{cli, config::Settings, source::PlaylistRef};
//!
//! #[tokio::main]
//! async fn main() -> playlist_backup::Result<()> {
//!     let settings = Settings {
//!         save: vec![PlaylistRef::Liked],
//!         ..Settings::default()
//!     };
//!     cli::run(&settings).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod source;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Backup written to {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the binary's top level, where an error cannot be handled
/// any further. Library code returns [`Error`] instead.
///
/// # Example
///
/// ```
/// error!("{}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as backup rows that are skipped because
/// they come from another origin.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
