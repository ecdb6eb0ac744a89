use std::path::PathBuf;

use client::SessionStore;
use uuid::Uuid;

fn scratch_path() -> PathBuf {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_sessions");
    std::fs::create_dir_all(&root).unwrap();
    root.join(format!("session_{}.json", Uuid::new_v4()))
}

#[tokio::test]
async fn token_round_trips_through_the_file() {
    let path = scratch_path();
    let store = SessionStore::load_or_empty(path.clone());
    assert!(store.token().await.is_none());

    store.set_token("abc").await.unwrap();
    assert_eq!(store.token().await.as_deref(), Some("abc"));

    let reloaded = SessionStore::load_or_empty(path);
    assert_eq!(reloaded.token().await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn clearing_the_token_keeps_remembered_credentials() {
    let path = scratch_path();
    let store = SessionStore::load_or_empty(path.clone());
    store.set_token("abc").await.unwrap();
    store
        .remember_credentials("a@b.com", "hunter2")
        .await
        .unwrap();

    store.clear_token().await.unwrap();

    let reloaded = SessionStore::load_or_empty(path);
    assert!(reloaded.token().await.is_none());
    let creds = reloaded.remembered().await.unwrap();
    assert_eq!(creds.email, "a@b.com");
    assert_eq!(creds.password, "hunter2");
}

#[tokio::test]
async fn forgetting_credentials_leaves_the_token() {
    let path = scratch_path();
    let store = SessionStore::load_or_empty(path);
    store.set_token("abc").await.unwrap();
    store
        .remember_credentials("a@b.com", "hunter2")
        .await
        .unwrap();

    store.forget_credentials().await.unwrap();

    assert!(store.remembered().await.is_none());
    assert_eq!(store.token().await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn missing_or_corrupt_files_load_as_unauthenticated() {
    let missing = SessionStore::load_or_empty(scratch_path());
    assert!(missing.token().await.is_none());

    let path = scratch_path();
    std::fs::write(&path, "not json").unwrap();
    let corrupt = SessionStore::load_or_empty(path);
    assert!(corrupt.token().await.is_none());
    assert!(corrupt.remembered().await.is_none());
}
