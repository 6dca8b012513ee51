use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::config::Credentials;

/// OAuth token as stored in the token cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful response from the accounts token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

/// One row of a backup file. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub origin: String,
    pub playlist_name: String,
    pub playlist_url: String,
    pub track_name: String,
    pub track_id: String,
    pub artist: String,
    pub album: String,
    pub duration_ms: u64,
    pub added_at: String,
}

/// The records of one playlist and its resolved name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTracks {
    pub name: String,
    pub records: Vec<TrackRecord>,
}

#[derive(Tabled)]
pub struct BackupTableRow {
    pub playlist: String,
    pub tracks: usize,
}

/// A page of an offset paginated Spotify listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistName {
    pub name: String,
}

/// An entry of a playlist or of the saved tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePlaylistDetailsRequest {
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// Authorization request waiting for its callback.
#[derive(Debug, Clone)]
pub struct PendingAuth {
    pub state: String,
    pub credentials: Credentials,
    pub token: Option<Token>,
    pub error: Option<String>,
}
