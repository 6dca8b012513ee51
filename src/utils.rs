use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::{
    Error, Result,
    source::{Origin, PlaylistRef},
    types::TrackArtist,
};

/// Suffix appended to a playlist name while it collides with an existing one.
pub const NAME_SUFFIX: &str = "_1";

/// Generates a random `state` value for the authorization request.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Returns whether the granted scope string contains every requested scope.
pub fn scope_covers(granted: &str, requested: &str) -> bool {
    let granted: HashSet<&str> = granted.split_whitespace().collect();
    requested
        .split_whitespace()
        .all(|scope| granted.contains(scope))
}

/// Turns one reference or a sequence of references into an ordered list.
///
/// # Example
///
/// ```
/// let single = normalize_references(["liked"]);
/// let many = normalize_references(vec![url_a, url_b]);
/// ```
pub fn normalize_references<I, S>(references: I) -> Vec<PlaylistRef>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    references
        .into_iter()
        .map(|r| PlaylistRef::parse(r.as_ref()))
        .collect()
}

/// Extracts the playlist id from a playlist URL, URI or bare id.
///
/// Accepted forms:
/// - `https://open.spotify.com/playlist/<id>?si=...`
/// - `spotify:playlist:<id>`
/// - `<id>`
pub fn parse_playlist_id(reference: &str) -> Result<String> {
    let reference = reference.trim();
    let invalid = || Error::InvalidReference(reference.to_string());

    let id = if let Some(id) = reference.strip_prefix("spotify:playlist:") {
        id.to_string()
    } else if reference.starts_with("http://") || reference.starts_with("https://") {
        let url = Url::parse(reference).map_err(|_| invalid())?;
        let mut segments = url.path_segments().ok_or_else(invalid)?;
        segments
            .by_ref()
            .find(|segment| *segment == "playlist")
            .ok_or_else(invalid)?;
        segments.next().ok_or_else(invalid)?.to_string()
    } else {
        reference.to_string()
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }

    Ok(id)
}

pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

pub fn join_artists(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Appends [`NAME_SUFFIX`] until `name` is not among `existing`.
///
/// The suffix is appended to the previous candidate, so `X` resolves to
/// `X_1`, then `X_1_1`, and never to `X_2`.
pub fn resolve_unique_name(name: &str, existing: &HashSet<String>) -> String {
    let mut candidate = name.to_string();
    while existing.contains(&candidate) {
        candidate.push_str(NAME_SUFFIX);
    }
    candidate
}

/// Playlist name used when an upload is not given one: `Backup_<DD_MM_YYYY>`.
pub fn default_playlist_name(date: NaiveDate) -> String {
    format!("Backup_{}", date.format("%d_%m_%Y"))
}

/// File name of a backup: `<origin>_<YYYY-MM-DD_HHMMSS>_<user_id>.csv`.
pub fn backup_file_name(origin: Origin, written_at: NaiveDateTime, user_id: &str) -> String {
    format!(
        "{}_{}_{}.csv",
        origin.tag(),
        written_at.format("%Y-%m-%d_%H%M%S"),
        user_id
    )
}
