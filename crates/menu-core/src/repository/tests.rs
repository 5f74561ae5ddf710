//! Repository Integration Tests
//!
//! MenuRepository against the in-memory contents API.

use crate::config::RepoConfig;
use crate::error::MenuError;
use crate::repository::{MemoryContentApi, MenuRepository, Operation};

const MENU: &str = r#"[{"section":"Coffees","items":[]}]"#;

fn setup_repo() -> MenuRepository<MemoryContentApi> {
    let config = RepoConfig { token: "test".into(), ..RepoConfig::default() };
    let api = MemoryContentApi::new();
    api.insert(&config.menu_path, MENU);
    MenuRepository::new(api, config)
}

#[tokio::test]
async fn test_fetch_document() {
    let repo = setup_repo();
    let handle = repo.fetch_document().await.expect("Fetch failed");
    assert_eq!(handle.content, MENU);
    assert_eq!(handle.path, "data/menu.json");
    assert_eq!(Some(handle.sha), repo.api().sha("data/menu.json"));
}

#[tokio::test]
async fn test_fetch_missing_document() {
    let config = RepoConfig { token: "test".into(), ..RepoConfig::default() };
    let repo = MenuRepository::new(MemoryContentApi::new(), config);
    let err = repo.fetch_document().await.unwrap_err();
    assert!(matches!(err, MenuError::NotFound(_)));
}

#[tokio::test]
async fn test_update_with_current_sha() {
    let repo = setup_repo();
    let handle = repo.fetch_document().await.unwrap();

    let new_sha = repo.update_document("[]", "Clear menu", &handle.sha).await.expect("Update failed");
    assert_ne!(new_sha, handle.sha);
    assert_eq!(repo.api().read_string("data/menu.json").as_deref(), Some("[]"));
    assert_eq!(repo.api().commits(), vec!["Clear menu".to_string()]);
}

#[tokio::test]
async fn test_update_with_stale_sha_conflicts() {
    let repo = setup_repo();
    let stale = repo.fetch_document().await.unwrap();
    repo.update_document("[]", "Someone else", &stale.sha).await.unwrap();

    let err = repo
        .update_document(r#"[{"section":"Teas","items":[]}]"#, "Mine", &stale.sha)
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Conflict(_)));
    assert_eq!(repo.api().read_string("data/menu.json").as_deref(), Some("[]"));
}

#[tokio::test]
async fn test_upload_asset_returns_url() {
    let repo = setup_repo();
    let url = repo.upload_asset(&[1, 2, 3], "123-latte.jpg").await.expect("Upload failed");
    assert_eq!(url, "memory://images/123-latte.jpg");
    assert_eq!(repo.api().read("images/123-latte.jpg"), Some(vec![1, 2, 3]));
    assert_eq!(repo.api().commits(), vec!["Upload image: 123-latte.jpg".to_string()]);
}

#[tokio::test]
async fn test_upload_overwrites_existing_name() {
    let repo = setup_repo();
    repo.upload_asset(&[1], "same.jpg").await.unwrap();
    repo.upload_asset(&[2], "same.jpg").await.unwrap();
    assert_eq!(repo.api().read("images/same.jpg"), Some(vec![2]));
}

#[tokio::test]
async fn test_delete_asset() {
    let repo = setup_repo();
    repo.api().insert("images/old.jpg", vec![9u8]);
    repo.delete_asset("images/old.jpg", "Delete image").await.expect("Delete failed");
    assert!(!repo.api().contains("images/old.jpg"));

    let err = repo.delete_asset("images/old.jpg", "Delete image").await.unwrap_err();
    assert!(matches!(err, MenuError::NotFound(_)));
}

#[tokio::test]
async fn test_failures_are_not_retried() {
    let repo = setup_repo();
    repo.api().fail_next(Operation::Get, None, MenuError::Transport("offline".into()));
    let err = repo.fetch_document().await.unwrap_err();
    assert_eq!(err, MenuError::Transport("offline".into()));
    assert!(repo.fetch_document().await.is_ok());
}

#[tokio::test]
async fn test_content_with_line_breaks_decodes() {
    // The hosted API wraps base64 at 60 columns
    let repo = setup_repo();
    let long = format!(r#"[{{"section":"{}","items":[]}}]"#, "x".repeat(200));
    repo.api().insert("data/menu.json", long.clone());
    let handle = repo.fetch_document().await.unwrap();
    assert_eq!(handle.content, long);
}
