//! # CLI Module
//!
//! The command layer of the tool. It turns a [`Settings`] value into work:
//!
//! - [`create_csv_backup`] - Reads playlists through a [`crate::source::TrackSource`] and
//!   writes them to one CSV file
//! - [`upload_backup`] - Validates a CSV backup and restores it as a new
//!   private playlist
//! - [`run`] - Decides which of the two to do and for which origin
//!
//! ## Flow
//!
//! ```text
//! run(settings)
//!   ├── settings.actions()          fails early if nothing was requested
//!   └── spotify_handler
//!         ├── get_credentials       one session, union of needed scopes
//!         ├── create_csv_backup     if playlists to save were given
//!         └── upload_backup         if a backup file was given
//! ```
//!
//! Backup runs before upload when both are requested. Errors are returned
//! to the caller; the binary prints them and exits.

mod backup;
mod upload;

pub use backup::create_csv_backup;
pub use upload::upload_backup;

use crate::{
    Result,
    config::Settings,
    management::BackupManager,
    source::{Origin, SpotifySource},
    spotify,
};

/// Runs the actions requested by `settings`.
///
/// # Errors
///
/// Returns [`crate::Error::Config`] before touching any file or the network
/// if neither playlists to save nor a backup to upload are given.
pub async fn run(settings: &Settings) -> Result<()> {
    settings.actions()?;

    match settings.origin {
        Origin::Spotify => spotify_handler(settings).await,
    }
}

/// Backs up and/or uploads on Spotify, sharing one authenticated session.
pub async fn spotify_handler(settings: &Settings) -> Result<()> {
    let actions = settings.actions()?;

    let mut session = spotify::auth::get_credentials(
        &settings.env_path,
        &settings.cache_path,
        &actions.scope(),
    )
    .await?;

    if actions.backup {
        let backups = BackupManager::new(&settings.export_dir);
        let mut source = SpotifySource::new(&mut session);
        create_csv_backup(&mut source, &settings.save, &backups).await?;
    }

    if let Some(path) = &settings.upload_path {
        upload_backup(
            &mut session,
            path,
            settings.upload_name.as_deref(),
            settings.origin,
        )
        .await?;
    }

    Ok(())
}

