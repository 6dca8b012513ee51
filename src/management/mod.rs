mod auth;
mod backup;

pub use auth::TokenManager;
pub use backup::BackupManager;
pub use backup::BackupTracks;
pub use backup::CSV_HEADER;
pub use backup::from_csv;
pub use backup::parse_backup;
pub use backup::to_csv;
