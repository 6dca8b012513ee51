mod common;

use std::collections::HashSet;

use chrono::Local;
use common::{FakeApi, record};
use playlist_backup::{
    Error,
    cli::upload_backup,
    management::to_csv,
    source::Origin,
    spotify::playlist,
    utils,
};

fn write_backup(dir: &tempfile::TempDir, ids: &[&str]) -> std::path::PathBuf {
    let records: Vec<_> = ids.iter().map(|id| record("spotify", id)).collect();
    let path = dir.path().join("backup.csv");
    std::fs::write(&path, to_csv(&records).unwrap()).unwrap();
    path
}

#[test]
fn test_collision_appends_suffix_to_previous_candidate() {
    let existing: HashSet<String> = ["X", "X_1"].iter().map(|s| s.to_string()).collect();

    assert_eq!(utils::resolve_unique_name("X", &existing), "X_1_1");
    assert_eq!(utils::resolve_unique_name("Y", &existing), "Y");
}

#[tokio::test]
async fn test_existing_names_are_read_from_all_pages() {
    let names: Vec<String> = (0..120).map(|i| format!("List {}", i)).collect();
    let name_refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
    let mut api = FakeApi::new("user").with_existing(&name_refs);

    let existing = playlist::existing_names(&mut api).await.unwrap();

    assert_eq!(existing.len(), 120);
    assert!(existing.contains("List 119"));
}

#[tokio::test]
async fn test_upload_creates_private_playlist_with_unique_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(&dir, &["a", "b", "c"]);
    let mut filler: Vec<String> = (0..60).map(|i| format!("Other {}", i)).collect();
    filler.push("Mix".to_string());
    let filler_refs: Vec<&str> = filler.iter().map(|s| s.as_str()).collect();
    let mut api = FakeApi::new("me").with_existing(&filler_refs);

    let created = upload_backup(&mut api, &path, Some("Mix"), Origin::Spotify)
        .await
        .unwrap();

    assert_eq!(created.name, "Mix_1");
    assert_eq!(api.created.len(), 1);
    let (user_id, request) = &api.created[0];
    assert_eq!(user_id, "me");
    assert!(!request.public);
    assert!(!request.collaborative);
    assert!(request.description.starts_with("Backup created on "));

    assert_eq!(api.details.len(), 1);
    assert_eq!(api.details[0].0, created.id);
    assert!(!api.details[0].1.public);

    assert_eq!(
        api.added,
        vec![(
            created.id.clone(),
            vec![
                "spotify:track:a".to_string(),
                "spotify:track:b".to_string(),
                "spotify:track:c".to_string()
            ]
        )]
    );
}

#[tokio::test]
async fn test_upload_defaults_to_dated_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(&dir, &["a"]);
    let mut api = FakeApi::new("me");

    let created = upload_backup(&mut api, &path, None, Origin::Spotify)
        .await
        .unwrap();

    assert_eq!(
        created.name,
        utils::default_playlist_name(Local::now().date_naive())
    );
}

#[tokio::test]
async fn test_large_upload_keeps_order_across_requests() {
    let dir = tempfile::tempdir().unwrap();
    let ids: Vec<String> = (0..250).map(|i| format!("t{}", i)).collect();
    let id_refs: Vec<&str> = ids.iter().map(|s| s.as_str()).collect();
    let path = write_backup(&dir, &id_refs);
    let mut api = FakeApi::new("me");

    upload_backup(&mut api, &path, Some("Big"), Origin::Spotify)
        .await
        .unwrap();

    let sizes: Vec<usize> = api.added.iter().map(|(_, uris)| uris.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    let uris: Vec<String> = api.added.into_iter().flat_map(|(_, uris)| uris).collect();
    let expected: Vec<String> = ids.iter().map(|id| utils::track_uri(id)).collect();
    assert_eq!(uris, expected);
}

#[tokio::test]
async fn test_invalid_backup_makes_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.csv");
    std::fs::write(&path, to_csv(&[record("ytmusic", "1")]).unwrap()).unwrap();
    let mut api = FakeApi::new("me");

    let result = upload_backup(&mut api, &path, Some("Mix"), Origin::Spotify).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(api.calls, 0);
    assert!(api.created.is_empty());
}

#[tokio::test]
async fn test_tracks_without_id_are_not_uploaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(&dir, &["a", "", "b"]);
    let mut api = FakeApi::new("me");

    let created = upload_backup(&mut api, &path, Some("Mix"), Origin::Spotify)
        .await
        .unwrap();

    assert_eq!(
        api.added,
        vec![(
            created.id.clone(),
            vec!["spotify:track:a".to_string(), "spotify:track:b".to_string()]
        )]
    );
}

#[tokio::test]
async fn test_backup_of_local_files_only_makes_no_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_backup(&dir, &["", " "]);
    let mut api = FakeApi::new("me");

    let result = upload_backup(&mut api, &path, Some("Mix"), Origin::Spotify).await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(api.calls, 0);
    assert!(api.created.is_empty());
}
