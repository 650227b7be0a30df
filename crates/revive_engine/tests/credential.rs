use std::fs;

use revive_engine::{CredentialError, CredentialProvider, FileCredentialStore};
use tempfile::TempDir;

#[tokio::test]
async fn provisioned_key_is_present() {
    let store = FileCredentialStore::new(Some("  provisioned  ".to_string()), None);
    assert!(store.has_credential().await);
    assert_eq!(store.api_key().await.as_deref(), Some("provisioned"));
}

#[tokio::test]
async fn blank_provisioned_key_counts_as_absent() {
    let store = FileCredentialStore::new(Some("   ".to_string()), None);
    assert!(!store.has_credential().await);
}

#[tokio::test]
async fn connected_key_is_persisted_and_reloaded() {
    let temp = TempDir::new().unwrap();
    let key_file = temp.path().join("keys").join("api_key");

    let store = FileCredentialStore::new(None, Some(key_file.clone()));
    assert!(!store.has_credential().await);
    store.request_credential(" new-key ").await.unwrap();
    assert!(store.has_credential().await);
    assert_eq!(fs::read_to_string(&key_file).unwrap(), "new-key");

    let reloaded = FileCredentialStore::new(None, Some(key_file));
    assert_eq!(reloaded.api_key().await.as_deref(), Some("new-key"));
}

#[tokio::test]
async fn empty_key_is_refused() {
    let store = FileCredentialStore::new(None, None);
    let err = store.request_credential("  ").await.unwrap_err();
    assert!(matches!(err, CredentialError::Empty));
    assert!(!store.has_credential().await);
}

#[tokio::test]
async fn unwritable_key_file_fails_and_keeps_state() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("file");
    fs::write(&blocker, "x").unwrap();

    let store = FileCredentialStore::new(None, Some(blocker.join("api_key")));
    let err = store.request_credential("key").await.unwrap_err();
    assert!(matches!(err, CredentialError::Persist(_)));
    assert!(!store.has_credential().await);
}
