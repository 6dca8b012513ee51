//! # Spotify Integration Module
//!
//! This module talks to the Spotify Web API. It is split by concern:
//!
//! - [`auth`] - Authorization code flow, token exchange and refresh
//! - [`client`] - [`SpotifySession`], the authenticated HTTP client
//! - [`playlist`] - Track extraction and playlist creation on top of
//!   [`PlaylistApi`]
//!
//! ## The `PlaylistApi` seam
//!
//! Every endpoint the tool uses is a method of [`PlaylistApi`]. The extraction
//! and upload logic in [`playlist`] is written against the trait, and
//! [`SpotifySession`] implements it over HTTP. Requests are issued one at a
//! time; a non-success status is returned as an error and nothing is retried.
//!
//! ## API Coverage
//!
//! - `GET /me` - Current user id
//! - `GET /me/tracks` - Liked songs
//! - `GET /me/playlists` - Existing playlist names
//! - `GET /playlists/{id}` - Playlist name
//! - `GET /playlists/{id}/tracks` - Playlist entries
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `PUT /playlists/{id}` - Change playlist visibility
//! - `POST /playlists/{id}/tracks` - Add tracks
//! - `POST /api/token` - Token exchange and refresh

pub mod auth;
pub mod client;
pub mod playlist;

pub use client::SpotifySession;

use crate::{
    Result,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ChangePlaylistDetailsRequest,
        CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser, Page, Playlist, PlaylistItem,
    },
};

/// The Spotify Web API endpoints used by the tool.
#[allow(async_fn_in_trait)]
pub trait PlaylistApi {
    async fn current_user(&mut self) -> Result<CurrentUser>;

    async fn playlist_name(&mut self, playlist_id: &str) -> Result<String>;

    async fn playlist_items(
        &mut self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>>;

    async fn saved_tracks(&mut self, limit: u32, offset: u32) -> Result<Page<PlaylistItem>>;

    async fn current_user_playlists(&mut self, limit: u32, offset: u32) -> Result<Page<Playlist>>;

    async fn create_playlist(
        &mut self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse>;

    async fn change_playlist_details(
        &mut self,
        playlist_id: &str,
        request: &ChangePlaylistDetailsRequest,
    ) -> Result<()>;

    async fn add_tracks(
        &mut self,
        playlist_id: &str,
        request: &AddTrackToPlaylistRequest,
    ) -> Result<AddTrackToPlaylistResponse>;
}
