#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{Form, Json, Router, routing::post};
use playlist_backup::{
    Error, Result,
    config::Credentials,
    spotify::PlaylistApi,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, ChangePlaylistDetailsRequest,
        CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser, Page, Playlist, PlaylistItem,
        Track, TrackAlbum, TrackArtist, TrackRecord,
    },
};

/// In-memory stand-in for the Spotify Web API.
#[derive(Default)]
pub struct FakeApi {
    pub user_id: String,
    /// Playlist id -> (name, entries)
    pub playlists: HashMap<String, (String, Vec<PlaylistItem>)>,
    pub liked: Vec<PlaylistItem>,
    pub existing: Vec<Playlist>,
    pub created: Vec<(String, CreatePlaylistRequest)>,
    pub details: Vec<(String, ChangePlaylistDetailsRequest)>,
    pub added: Vec<(String, Vec<String>)>,
    /// (limit, offset) of every entry page requested
    pub item_pages: Vec<(u32, u32)>,
    pub calls: usize,
}

impl FakeApi {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_playlist(mut self, id: &str, name: &str, items: Vec<PlaylistItem>) -> Self {
        self.playlists
            .insert(id.to_string(), (name.to_string(), items));
        self
    }

    pub fn with_existing(mut self, names: &[&str]) -> Self {
        for (i, name) in names.iter().enumerate() {
            self.existing.push(Playlist {
                id: format!("existing{}", i),
                name: name.to_string(),
            });
        }
        self
    }
}

fn page<T: Clone>(items: &[T], limit: u32, offset: u32) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + limit as usize).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        next: (end < items.len()).then(|| format!("offset={}", end)),
        total: Some(items.len() as u64),
    }
}

impl PlaylistApi for FakeApi {
    async fn current_user(&mut self) -> Result<CurrentUser> {
        self.calls += 1;
        Ok(CurrentUser {
            id: self.user_id.clone(),
        })
    }

    async fn playlist_name(&mut self, playlist_id: &str) -> Result<String> {
        self.calls += 1;
        self.playlists
            .get(playlist_id)
            .map(|(name, _)| name.clone())
            .ok_or_else(|| Error::InvalidReference(playlist_id.to_string()))
    }

    async fn playlist_items(
        &mut self,
        playlist_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Page<PlaylistItem>> {
        self.calls += 1;
        self.item_pages.push((limit, offset));
        let (_, items) = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| Error::InvalidReference(playlist_id.to_string()))?;
        Ok(page(items, limit, offset))
    }

    async fn saved_tracks(&mut self, limit: u32, offset: u32) -> Result<Page<PlaylistItem>> {
        self.calls += 1;
        self.item_pages.push((limit, offset));
        Ok(page(&self.liked, limit, offset))
    }

    async fn current_user_playlists(&mut self, limit: u32, offset: u32) -> Result<Page<Playlist>> {
        self.calls += 1;
        Ok(page(&self.existing, limit, offset))
    }

    async fn create_playlist(
        &mut self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<CreatePlaylistResponse> {
        self.calls += 1;
        self.created.push((user_id.to_string(), request.clone()));
        Ok(CreatePlaylistResponse {
            id: format!("new{}", self.created.len()),
            name: request.name.clone(),
            public: Some(true),
        })
    }

    async fn change_playlist_details(
        &mut self,
        playlist_id: &str,
        request: &ChangePlaylistDetailsRequest,
    ) -> Result<()> {
        self.calls += 1;
        self.details
            .push((playlist_id.to_string(), request.clone()));
        Ok(())
    }

    async fn add_tracks(
        &mut self,
        playlist_id: &str,
        request: &AddTrackToPlaylistRequest,
    ) -> Result<AddTrackToPlaylistResponse> {
        self.calls += 1;
        self.added
            .push((playlist_id.to_string(), request.uris.clone()));
        Ok(AddTrackToPlaylistResponse {
            snapshot_id: format!("snapshot{}", self.added.len()),
        })
    }
}

pub fn item(id: &str, name: &str, artists: &[&str], album: &str) -> PlaylistItem {
    PlaylistItem {
        added_at: Some("2024-05-01T10:00:00Z".to_string()),
        track: Some(Track {
            id: Some(id.to_string()),
            name: name.to_string(),
            artists: artists
                .iter()
                .map(|a| TrackArtist {
                    name: a.to_string(),
                })
                .collect(),
            album: TrackAlbum {
                name: album.to_string(),
            },
            duration_ms: 180_000,
        }),
    }
}

/// `count` entries with ids `<prefix>0`, `<prefix>1`, ...
pub fn items(prefix: &str, count: usize) -> Vec<PlaylistItem> {
    (0..count)
        .map(|i| {
            item(
                &format!("{}{}", prefix, i),
                &format!("Song {}", i),
                &["Artist"],
                "Album",
            )
        })
        .collect()
}

pub fn record(origin: &str, track_id: &str) -> TrackRecord {
    TrackRecord {
        origin: origin.to_string(),
        playlist_name: "Road Trip".to_string(),
        playlist_url: "https://open.spotify.com/playlist/abc".to_string(),
        track_name: format!("Song {}", track_id),
        track_id: track_id.to_string(),
        artist: "Artist A, Artist B".to_string(),
        album: "Album".to_string(),
        duration_ms: 215_000,
        added_at: "2024-05-01T10:00:00Z".to_string(),
    }
}

/// Form fields received by a stub token endpoint, one entry per request.
pub type TokenRequests = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serves `body` as the answer to every POST on `/api/token` of a local
/// server and returns credentials pointing at it.
pub async fn token_endpoint(body: serde_json::Value) -> (Credentials, TokenRequests) {
    let requests: TokenRequests = Arc::default();
    let seen = Arc::clone(&requests);

    let app = Router::new().route(
        "/api/token",
        post(move |Form(form): Form<HashMap<String, String>>| {
            let seen = Arc::clone(&seen);
            let body = body.clone();
            async move {
                seen.lock().unwrap().push(form);
                Json(body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });

    let mut credentials = credentials();
    credentials.token_url = format!("http://{}/api/token", addr);
    (credentials, requests)
}

/// Credentials whose endpoints all point at a closed local port.
pub fn credentials() -> Credentials {
    Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        api_url: "http://127.0.0.1:9/v1".to_string(),
        auth_url: "http://127.0.0.1:9/authorize".to_string(),
        token_url: "http://127.0.0.1:9/api/token".to_string(),
    }
}
