use std::collections::HashSet;

use chrono::Local;

use crate::{
    Error, Result,
    source::{LIKED_SONGS_LABEL, Origin, PlaylistRef},
    spotify::PlaylistApi,
    types::{
        AddTrackToPlaylistRequest, ChangePlaylistDetailsRequest, CreatePlaylistRequest,
        CreatePlaylistResponse, PlaylistItem, PlaylistTracks, TrackRecord,
    },
    utils,
};

/// Page size for playlist entries, the maximum the API accepts.
pub const PLAYLIST_PAGE_LIMIT: u32 = 100;

/// Page size for liked songs, the maximum `/me/tracks` accepts.
pub const SAVED_TRACKS_PAGE_LIMIT: u32 = 50;

/// Page size for the user's playlists.
pub const USER_PLAYLISTS_PAGE_LIMIT: u32 = 50;

/// Maximum number of tracks per add request.
pub const ADD_TRACKS_LIMIT: usize = 100;

/// Fetches every entry of a playlist (or of the liked songs) as track records.
///
/// Pages are requested with an increasing offset until the API reports no
/// further page. Records are returned in the order the API lists them,
/// together with the resolved playlist name.
///
/// # Arguments
///
/// * `api` - An authenticated [`PlaylistApi`]
/// * `reference` - The playlist to read
///
/// # Errors
///
/// - [`Error::InvalidReference`] if no playlist id can be taken from `reference`
/// - [`Error::UnavailableTrack`] if an entry has no track object, e.g. a track
///   removed from the catalogue; such entries are not skipped
/// - Any error of the underlying requests, unchanged
pub async fn get_playlist_tracks<A: PlaylistApi>(
    api: &mut A,
    reference: &PlaylistRef,
) -> Result<PlaylistTracks> {
    let (playlist_id, playlist_name, limit) = match reference {
        PlaylistRef::Liked => (None, LIKED_SONGS_LABEL.to_string(), SAVED_TRACKS_PAGE_LIMIT),
        PlaylistRef::Playlist(url) => {
            let id = utils::parse_playlist_id(url)?;
            let name = api.playlist_name(&id).await?;
            (Some(id), name, PLAYLIST_PAGE_LIMIT)
        }
    };

    let mut records: Vec<TrackRecord> = Vec::new();
    let mut offset = 0;

    loop {
        let page = match &playlist_id {
            Some(id) => api.playlist_items(id, limit, offset).await?,
            None => api.saved_tracks(limit, offset).await?,
        };

        for item in page.items {
            let position = records.len();
            records.push(to_record(
                item,
                &playlist_name,
                reference.as_str(),
                position,
            )?);
        }

        if page.next.is_none() {
            break;
        }
        offset += limit;
    }

    Ok(PlaylistTracks {
        name: playlist_name,
        records,
    })
}

fn to_record(
    item: PlaylistItem,
    playlist_name: &str,
    playlist_url: &str,
    position: usize,
) -> Result<TrackRecord> {
    let track = item.track.ok_or_else(|| Error::UnavailableTrack {
        playlist: playlist_name.to_string(),
        position,
    })?;

    Ok(TrackRecord {
        origin: Origin::Spotify.tag().to_string(),
        playlist_name: playlist_name.to_string(),
        playlist_url: playlist_url.to_string(),
        track_name: track.name,
        track_id: track.id.unwrap_or_default(),
        artist: utils::join_artists(&track.artists),
        album: track.album.name,
        duration_ms: track.duration_ms,
        added_at: item.added_at.unwrap_or_default(),
    })
}

/// Collects the names of all playlists of the current user.
pub async fn existing_names<A: PlaylistApi>(api: &mut A) -> Result<HashSet<String>> {
    let mut names = HashSet::new();
    let mut offset = 0;

    loop {
        let page = api
            .current_user_playlists(USER_PLAYLISTS_PAGE_LIMIT, offset)
            .await?;
        names.extend(page.items.into_iter().map(|p| p.name));

        if page.next.is_none() {
            break;
        }
        offset += USER_PLAYLISTS_PAGE_LIMIT;
    }

    Ok(names)
}

/// Creates a private playlist named after `name`.
///
/// If the user already owns a playlist of that name, `_1` is appended until
/// the name is free (see [`utils::resolve_unique_name`]). After creation the
/// playlist is set private once more, as the create call does not reliably
/// honour `public: false`.
pub async fn create<A: PlaylistApi>(api: &mut A, name: &str) -> Result<CreatePlaylistResponse> {
    let existing = existing_names(api).await?;
    let name = utils::resolve_unique_name(name, &existing);
    let user_id = api.current_user().await?.id;

    let request = CreatePlaylistRequest {
        name,
        description: format!(
            "Backup created on {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
        public: false,
        collaborative: false,
    };

    let playlist = api.create_playlist(&user_id, &request).await?;
    api.change_playlist_details(&playlist.id, &ChangePlaylistDetailsRequest { public: false })
        .await?;

    Ok(playlist)
}

/// Adds the tracks to the playlist, in order.
///
/// The API takes at most [`ADD_TRACKS_LIMIT`] URIs per request, so longer
/// lists are sent as consecutive chunks.
pub async fn add_tracks<A: PlaylistApi>(
    api: &mut A,
    playlist_id: &str,
    track_ids: &[String],
) -> Result<()> {
    for chunk in track_ids.chunks(ADD_TRACKS_LIMIT) {
        let request = AddTrackToPlaylistRequest {
            uris: chunk.iter().map(|id| utils::track_uri(id)).collect(),
        };
        api.add_tracks(playlist_id, &request).await?;
    }

    Ok(())
}
