//! LinkService tests
//!
//! Business flow without the HTTP layer.

use std::sync::Arc;

use minilinker::config::{DatabaseConfig, RunEnvironment};
use minilinker::errors::MinilinkerError;
use minilinker::services::{CreateLinkRequest, LinkService, ThumbnailStore, UploadedFile};
use minilinker::storage::{ConnectionGuard, LinkRepository};
use minilinker::utils::SHORT_ID_LENGTH;
use tempfile::TempDir;

async fn create_service() -> (LinkService, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        url: Some(format!(
            "sqlite://{}?mode=rwc",
            dir.path().join("service.db").display()
        )),
        ..Default::default()
    };
    let guard = ConnectionGuard::establish(&config, RunEnvironment::Production)
        .await
        .unwrap();
    let thumbnails = Arc::new(ThumbnailStore::new(dir.path().join("uploads"), 64).unwrap());
    let service = LinkService::new(LinkRepository::new(Arc::new(guard)), thumbnails);
    (service, dir)
}

fn request(long_url: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        long_url: Some(long_url.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_and_resolve() {
    let (service, _dir) = create_service().await;

    let link = service.create_link(request("https://example.com")).await.unwrap();
    assert_eq!(link.short_id.len(), SHORT_ID_LENGTH);
    assert_eq!(link.description, "");
    assert!(!link.has_thumbnail());

    let resolved = service.resolve(&link.short_id).await.unwrap();
    assert_eq!(resolved.long_url, "https://example.com");
}

#[tokio::test]
async fn test_blank_long_url_is_bad_request() {
    let (service, _dir) = create_service().await;

    for long_url in [None, Some(String::new()), Some("   ".to_string())] {
        let req = CreateLinkRequest {
            long_url,
            ..Default::default()
        };
        assert!(matches!(
            service.create_link(req).await,
            Err(MinilinkerError::BadRequest(_))
        ));
    }
    assert!(service.list_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unredirectable_long_url_is_bad_request() {
    let (service, _dir) = create_service().await;

    for long_url in ["https://a.com\nx", "ftp://example.com/file", "not a url"] {
        assert!(matches!(
            service.create_link(request(long_url)).await,
            Err(MinilinkerError::BadRequest(_))
        ));
    }
    assert!(service.list_links().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_stores_thumbnail() {
    let (service, _dir) = create_service().await;

    let req = CreateLinkRequest {
        thumbnail: Some(UploadedFile {
            filename: Some("my photo.jpg".to_string()),
            bytes: b"jpeg".to_vec(),
        }),
        ..request("https://example.com/photo")
    };
    let link = service.create_link(req).await.unwrap();

    assert_eq!(link.thumbnail, "my_photo.jpg");
    let stored = std::fs::read(service.thumbnails().dir().join("my_photo.jpg")).unwrap();
    assert_eq!(stored, b"jpeg");
}

#[tokio::test]
async fn test_thumbnail_without_filename_is_ignored() {
    let (service, _dir) = create_service().await;

    let req = CreateLinkRequest {
        thumbnail: Some(UploadedFile {
            filename: None,
            bytes: b"orphan".to_vec(),
        }),
        ..request("https://example.com")
    };
    let link = service.create_link(req).await.unwrap();
    assert_eq!(link.thumbnail, "");
}

#[tokio::test]
async fn test_delete_link() {
    let (service, _dir) = create_service().await;
    let link = service.create_link(request("https://example.com")).await.unwrap();

    service.delete_link(&link.short_id).await.unwrap();
    assert!(matches!(
        service.delete_link(&link.short_id).await,
        Err(MinilinkerError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_unavailable_storage_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let thumbnails = Arc::new(ThumbnailStore::new(dir.path(), 1024).unwrap());
    let repo = LinkRepository::new(Arc::new(ConnectionGuard::failed("down")));
    let service = LinkService::new(repo, thumbnails);

    let req = CreateLinkRequest {
        thumbnail: Some(UploadedFile {
            filename: Some("never.png".to_string()),
            bytes: b"png".to_vec(),
        }),
        ..request("https://example.com")
    };
    assert!(matches!(
        service.create_link(req).await,
        Err(MinilinkerError::StorageUnavailable(_))
    ));
    assert!(!dir.path().join("never.png").exists());
    assert!(service.check_storage().await.is_err());
}
