//! Track origins, playlist references and the track source capability.
//!
//! An [`Origin`] names the streaming service a [`crate::types::TrackRecord`] was taken from.
//! Backups carry the origin tag in every row, and only rows of the expected
//! origin are ever uploaded again. Spotify is the only origin implemented;
//! further services plug in by implementing [`TrackSource`].

use std::{fmt, str::FromStr};

use crate::{
    Error, Result,
    spotify::{self, PlaylistApi},
    types::PlaylistTracks,
};

/// Sentinel reference selecting the user's saved tracks.
pub const LIKED_SONGS: &str = "liked";

/// Playlist name recorded for rows taken from the saved tracks.
pub const LIKED_SONGS_LABEL: &str = "Liked Songs";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Spotify,
}

impl Origin {
    /// The tag written to the `origin` column of a backup.
    pub fn tag(&self) -> &'static str {
        match self {
            Origin::Spotify => "spotify",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "spotify" => Ok(Origin::Spotify),
            _ => Err(Error::Config(format!("Unknown origin selected: {}", s))),
        }
    }
}

/// What to back up: one playlist or the liked songs collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistRef {
    Liked,
    /// A playlist URL, `spotify:playlist:` URI or bare playlist id.
    Playlist(String),
}

impl PlaylistRef {
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        if reference.eq_ignore_ascii_case(LIKED_SONGS) {
            PlaylistRef::Liked
        } else {
            PlaylistRef::Playlist(reference.to_string())
        }
    }

    /// The value stored in the `playlist_url` column.
    pub fn as_str(&self) -> &str {
        match self {
            PlaylistRef::Liked => LIKED_SONGS,
            PlaylistRef::Playlist(url) => url,
        }
    }
}

impl fmt::Display for PlaylistRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistRef::Liked => f.write_str(LIKED_SONGS_LABEL),
            PlaylistRef::Playlist(url) => f.write_str(url),
        }
    }
}

/// A service tracks can be backed up from.
///
/// Implementations resolve a [`PlaylistRef`] into its name and an ordered
/// list of track records, all tagged with [`TrackSource::origin`].
#[allow(async_fn_in_trait)]
pub trait TrackSource {
    fn origin(&self) -> Origin;

    /// Identifier of the authenticated user, used to name backup files.
    async fn user_id(&mut self) -> Result<String>;

    async fn playlist_tracks(&mut self, reference: &PlaylistRef) -> Result<PlaylistTracks>;
}

/// The Spotify track source, backed by any [`PlaylistApi`] implementation.
pub struct SpotifySource<'a, A: PlaylistApi> {
    api: &'a mut A,
}

impl<'a, A: PlaylistApi> SpotifySource<'a, A> {
    pub fn new(api: &'a mut A) -> Self {
        Self { api }
    }
}

impl<A: PlaylistApi> TrackSource for SpotifySource<'_, A> {
    fn origin(&self) -> Origin {
        Origin::Spotify
    }

    async fn user_id(&mut self) -> Result<String> {
        Ok(self.api.current_user().await?.id)
    }

    async fn playlist_tracks(&mut self, reference: &PlaylistRef) -> Result<PlaylistTracks> {
        spotify::playlist::get_playlist_tracks(self.api, reference).await
    }
}
