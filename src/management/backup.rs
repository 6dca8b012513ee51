use std::path::{Path, PathBuf};

use chrono::Local;
use csv::{ReaderBuilder, WriterBuilder};

use crate::{
    Error, Result,
    source::Origin,
    types::TrackRecord,
    utils, warning,
};

/// Column names of a backup file, in order.
pub const CSV_HEADER: [&str; 9] = [
    "origin",
    "playlist_name",
    "playlist_url",
    "track_name",
    "track_id",
    "artist",
    "album",
    "duration_ms",
    "added_at",
];

/// Track ids read back from a backup file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupTracks {
    /// Ids of the rows whose origin matched, in file order.
    pub track_ids: Vec<String>,
    /// Number of rows skipped because of another origin.
    pub skipped: usize,
}

/// Writes and reads CSV backups inside an export directory.
pub struct BackupManager {
    export_dir: PathBuf,
}

impl BackupManager {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Writes `records` to a new timestamped backup file and returns its path.
    ///
    /// The export directory is created if it does not exist. Two backups of
    /// the same user written within the same second share a file name, the
    /// later one replacing the earlier.
    pub async fn save(
        &self,
        records: &[TrackRecord],
        origin: Origin,
        user_id: &str,
    ) -> Result<PathBuf> {
        async_fs::create_dir_all(&self.export_dir).await?;

        let file_name = utils::backup_file_name(origin, Local::now().naive_local(), user_id);
        let path = self.export_dir.join(file_name);

        let data = to_csv(records)?;
        async_fs::write(&path, data).await?;
        Ok(path)
    }

    /// Reads the track ids of all rows of `origin` from the backup at `path`.
    ///
    /// Rows of another origin are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if no row matches `origin`.
    pub async fn load(path: impl AsRef<Path>, origin: Origin) -> Result<BackupTracks> {
        let data = async_fs::read(path.as_ref()).await?;
        let backup = parse_backup(&data, origin)?;

        if backup.skipped > 0 {
            warning!(
                "{} tracks do not come from {} and will not be uploaded",
                backup.skipped,
                origin
            );
        }

        Ok(backup)
    }
}

/// Serializes `records` to CSV, header row included even when empty.
pub fn to_csv(records: &[TrackRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

pub fn from_csv(data: &[u8]) -> Result<Vec<TrackRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);
    let records = reader
        .deserialize::<TrackRecord>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

/// Reads the track ids of the rows tagged with `origin` from backup data.
///
/// The origin column is checked on the raw row, so rows of another origin
/// are skipped whatever the rest of their columns hold. Only matching rows
/// have to form a valid [`TrackRecord`].
///
/// # Errors
///
/// - [`Error::Validation`] if the data has no `origin` column or no row
///   matches `origin`
/// - [`Error::Csv`] if a matching row is malformed
pub fn parse_backup(data: &[u8], origin: Origin) -> Result<BackupTracks> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let origin_column = headers
        .iter()
        .position(|h| h == "origin")
        .ok_or_else(|| Error::Validation("backup has no origin column".to_string()))?;

    let mut total = 0;
    let mut track_ids: Vec<String> = Vec::new();
    for row in reader.records() {
        let row = row?;
        total += 1;
        if row.get(origin_column) != Some(origin.tag()) {
            continue;
        }

        let record: TrackRecord = row.deserialize(Some(&headers))?;
        track_ids.push(record.track_id);
    }

    if track_ids.is_empty() {
        return Err(Error::Validation(format!(
            "none of the {} rows come from {}, no tracks can be uploaded",
            total, origin
        )));
    }

    Ok(BackupTracks {
        skipped: total - track_ids.len(),
        track_ids,
    })
}
