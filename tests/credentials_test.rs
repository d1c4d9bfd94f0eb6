use scrobcli::{error::ScrobbleError, management::CredentialStore};

#[tokio::test]
async fn test_missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(dir.path().join("credentials.json"));

    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_persist_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/dir/credentials.json");
    let store = CredentialStore::new(path.clone());

    store.persist("abc").await.unwrap();
    assert_eq!(store.load().await.unwrap().as_deref(), Some("abc"));

    // last write wins
    store.persist("def").await.unwrap();
    assert_eq!(store.load().await.unwrap().as_deref(), Some("def"));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "session_key": "def" }));
}

#[tokio::test]
async fn test_reads_file_written_by_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, r#"{"session_key": "handwritten"}"#).unwrap();

    let store = CredentialStore::new(path);
    assert_eq!(store.load().await.unwrap().as_deref(), Some("handwritten"));
}

#[tokio::test]
async fn test_empty_key_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, r#"{"session_key": ""}"#).unwrap();

    assert_eq!(CredentialStore::new(path).load().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_file_is_persistence_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "{ broken").unwrap();

    let err = CredentialStore::new(path).load().await.unwrap_err();
    assert!(matches!(err, ScrobbleError::Persistence(_)));
}

#[tokio::test]
async fn test_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    let store = CredentialStore::new(path.clone());

    store.clear().await.unwrap();
    store.persist("abc").await.unwrap();
    store.clear().await.unwrap();

    assert!(!path.exists());
    assert_eq!(store.load().await.unwrap(), None);
}
