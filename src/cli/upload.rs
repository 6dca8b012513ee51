use std::path::Path;

use chrono::Local;

use crate::{
    Error, Result, info,
    management::BackupManager,
    source::Origin,
    spotify::{self, PlaylistApi},
    success,
    types::CreatePlaylistResponse,
    utils, warning,
};

/// Uploads a backup file as a new private playlist.
///
/// The backup is read and validated before any request is made, so a backup
/// without a single row of `origin` fails without touching the account. The
/// playlist is named `playlist_name`, or `Backup_<DD_MM_YYYY>` if none is
/// given, with `_1` suffixes appended while the name is taken.
///
/// Rows without a track id, such as local files, stay in the backup but are
/// not uploaded.
///
/// If adding the tracks fails, the freshly created playlist is left in place.
pub async fn upload_backup<A: PlaylistApi>(
    api: &mut A,
    path: &Path,
    playlist_name: Option<&str>,
    origin: Origin,
) -> Result<CreatePlaylistResponse> {
    let backup = BackupManager::load(path, origin).await?;

    let total = backup.track_ids.len();
    let track_ids: Vec<String> = backup
        .track_ids
        .into_iter()
        .filter(|id| !id.trim().is_empty())
        .collect();

    if track_ids.len() < total {
        warning!(
            "{} tracks have no track id (local files) and will not be uploaded",
            total - track_ids.len()
        );
    }
    if track_ids.is_empty() {
        return Err(Error::Validation(format!(
            "none of the {} tracks in {} have a track id, no tracks can be uploaded",
            total,
            path.display()
        )));
    }

    let name = match playlist_name {
        Some(name) => name.to_string(),
        None => utils::default_playlist_name(Local::now().date_naive()),
    };

    info!("Create playlist {}", name);
    let playlist = spotify::playlist::create(api, &name).await?;
    success!("Playlist {} created.", playlist.name);

    info!("Add {} tracks to playlist {}", track_ids.len(), playlist.name);
    spotify::playlist::add_tracks(api, &playlist.id, &track_ids).await?;
    success!("Tracks added to playlist {}", playlist.name);

    Ok(playlist)
}
