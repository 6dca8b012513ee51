use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Result, info,
    management::BackupManager,
    source::{PlaylistRef, TrackSource},
    success,
    types::{BackupTableRow, PlaylistTracks, TrackRecord},
};

/// Backs up the given playlists into one CSV file.
///
/// Playlists are read one after another and their records appended in the
/// order given; nothing is merged or de-duplicated. The file is named after
/// the source's origin, the current time and the user id.
///
/// # Returns
///
/// The path of the written backup file.
pub async fn create_csv_backup<S: TrackSource>(
    source: &mut S,
    references: &[PlaylistRef],
    backups: &BackupManager,
) -> Result<PathBuf> {
    let mut records: Vec<TrackRecord> = Vec::new();
    let mut summary: Vec<BackupTableRow> = Vec::new();

    for reference in references {
        let tracks = fetch_with_spinner(source, reference).await?;
        summary.push(BackupTableRow {
            playlist: tracks.name,
            tracks: tracks.records.len(),
        });
        records.extend(tracks.records);
    }

    let user_id = source.user_id().await?;
    let path = backups.save(&records, source.origin(), &user_id).await?;

    println!("{}", Table::new(summary));
    success!("Backup of {} tracks written to {}", records.len(), path.display());
    Ok(path)
}

async fn fetch_with_spinner<S: TrackSource>(
    source: &mut S,
    reference: &PlaylistRef,
) -> Result<PlaylistTracks> {
    info!("Fetching tracks of {}", reference);

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {}...", reference));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = source.playlist_tracks(reference).await;
    pb.finish_and_clear();
    result
}
