use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Result,
    config::Credentials,
    management::TokenManager,
    spotify::PlaylistApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ChangePlaylistDetailsRequest,
        CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser, Page, Playlist, PlaylistItem,
        PlaylistName,
    },
};

/// Fields requested for every playlist entry.
const PLAYLIST_ITEM_FIELDS: &str =
    "items(added_at,track(id,name,artists(name),album(name),duration_ms)),next,total";

/// An authenticated Spotify Web API session.
///
/// Holds the HTTP client, the application credentials and the token manager.
/// Every request asks the [`TokenManager`] for a valid access token first, so
/// an expired token is refreshed transparently.
pub struct SpotifySession {
    client: Client,
    credentials: Credentials,
    tokens: TokenManager,
}

impl SpotifySession {
    pub fn new(credentials: Credentials, tokens: TokenManager) -> Self {
        Self {
            client: Client::new(),
            credentials,
            tokens,
        }
    }

    /// Granted scope of the session's token.
    pub fn scope(&self) -> &str {
        &self.tokens.current_token().scope
    }

    async fn request(&mut self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.tokens.get_valid_token(&self.credentials).await?;
        let url = format!("{}{}", self.credentials.api_url, path);
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn get<T: DeserializeOwned>(&mut self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self
            .request(Method::GET, path)
            .await?
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }

    async fn send_json<B: Serialize>(
        &mut self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .request(method, path)
            .await?
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response)
    }
}

impl PlaylistApi for SpotifySession {
    async fn current_user(&mut self) -> Result<CurrentUser> {
        self.get("/me", &[]).await
    }

    async fn playlist_name(&mut self, playlist_id: &str) -> Result<String> {
        let playlist: PlaylistName = self
            .get(
                &format!("/playlists/{}", playlist_id),
                &[("fields", "name".to_string())],
            )
            .await?;
        Ok(playlist.name)
    }

    async fn playlist_items(
        &mut self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.get(
            &format!("/playlists/{}/tracks", playlist_id),
            &[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("fields", PLAYLIST_ITEM_FIELDS.to_string()),
            ],
        )
        .await
    }

    async fn saved_tracks(&mut self, limit: u32, offset: u32) -> Result<Page<PlaylistItem>> {
        self.get(
            "/me/tracks",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    async fn current_user_playlists(&mut self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
        self.get(
            "/me/playlists",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    async fn create_playlist(
        &mut self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        let response = self
            .send_json(Method::POST, &format!("/users/{}/playlists", user_id), request)
            .await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    async fn change_playlist_details(
        &mut self,
        playlist_id: &str,
        request: &ChangePlaylistDetailsRequest,
    ) -> Result<()> {
        self.send_json(Method::PUT, &format!("/playlists/{}", playlist_id), request)
            .await?;
        Ok(())
    }

    async fn add_tracks(
        &mut self,
        playlist_id: &str,
        request: &AddTrackToPlaylistRequest,
    ) -> Result<AddTrackToPlaylistResponse> {
        let response = self
            .send_json(
                Method::POST,
                &format!("/playlists/{}/tracks", playlist_id),
                request,
            )
            .await?;
        Ok(response.json::<AddTrackToPlaylistResponse>().await?)
    }
}
