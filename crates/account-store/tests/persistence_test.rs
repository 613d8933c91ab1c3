//! File persistence tests for the account store.

use account_store::{AccountStore, LinkedAccount, StoreError};
use tempfile::TempDir;

#[tokio::test]
async fn test_open_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = AccountStore::open(dir.path().join("accounts.json"))
        .await
        .unwrap();

    assert_eq!(store.count().await, 0);
}

#[tokio::test]
async fn test_accounts_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("accounts.json");

    {
        let store = AccountStore::open(&path).await.unwrap();
        store
            .insert(LinkedAccount::new("alice@example.org", "alice", "secret1"))
            .await
            .unwrap();
        store
            .insert(LinkedAccount::new("bob@example.org", "bob", "secret2"))
            .await
            .unwrap();
    }

    let reopened = AccountStore::open(&path).await.unwrap();
    assert_eq!(reopened.count().await, 2);

    let alice = reopened.get("alice@example.org").await.unwrap();
    assert_eq!(alice.username, "alice");
    assert!(alice.password_matches("secret1"));

    // No temp file is left behind after the atomic rename.
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_removal_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accounts.json");

    let store = AccountStore::open(&path).await.unwrap();
    store
        .insert(LinkedAccount::new("alice@example.org", "alice", "secret1"))
        .await
        .unwrap();
    store.remove("alice@example.org").await.unwrap();

    let reopened = AccountStore::open(&path).await.unwrap();
    assert!(reopened.get("alice@example.org").await.is_none());
}

#[tokio::test]
async fn test_corrupt_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accounts.json");
    std::fs::write(&path, b"not json").unwrap();

    let result = AccountStore::open(&path).await;
    assert!(matches!(result, Err(StoreError::Json(_))));
}

#[tokio::test]
async fn test_unknown_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accounts.json");
    std::fs::write(&path, br#"{"version": 99, "accounts": {}}"#).unwrap();

    let result = AccountStore::open(&path).await;
    assert!(matches!(
        result,
        Err(StoreError::Version { found: 99, expected: 1 })
    ));
}

#[tokio::test]
async fn test_failed_flush_rolls_back() {
    let dir = TempDir::new().unwrap();
    // The parent "directory" is a regular file, so every flush fails.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let store = AccountStore::open(blocker.join("accounts.json")).await.unwrap();

    let result = store
        .insert(LinkedAccount::new("alice@example.org", "alice", "secret1"))
        .await;

    assert!(matches!(result, Err(StoreError::Io(_))));
    assert!(store.get("alice@example.org").await.is_none());
}
