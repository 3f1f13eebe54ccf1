//! Link service
//!
//! Business flow for the HTTP layer: id generation, thumbnail storage and
//! repository calls. Handlers never touch the repository directly.

use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::{MinilinkerError, Result};
use crate::services::ThumbnailStore;
use crate::storage::{Link, LinkRepository};
use crate::utils::{generate_short_id, validate_url};

/// 上传的文件
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

/// Request to create a new link
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub long_url: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<UploadedFile>,
}

pub struct LinkService {
    repository: LinkRepository,
    thumbnails: Arc<ThumbnailStore>,
}

impl LinkService {
    pub fn new(repository: LinkRepository, thumbnails: Arc<ThumbnailStore>) -> Self {
        Self {
            repository,
            thumbnails,
        }
    }

    pub fn thumbnails(&self) -> &ThumbnailStore {
        &self.thumbnails
    }

    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<Link> {
        let long_url = req
            .long_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| MinilinkerError::bad_request("long_url is required"))?;
        let long_url =
            validate_url(&long_url).map_err(|e| MinilinkerError::bad_request(e.to_string()))?;

        // 存储不可用时不写入任何文件
        self.repository.ensure_available()?;

        let short_id = generate_short_id();
        let thumbnail = match req.thumbnail {
            Some(file) => {
                self.thumbnails
                    .save(file.filename.as_deref(), &file.bytes)
                    .await?
            }
            None => String::new(),
        };

        let link = Link::new(
            short_id,
            long_url,
            req.description.unwrap_or_default(),
            thumbnail,
        );
        self.repository.insert(&link).await?;

        info!("Created short link {} -> {}", link.short_id, link.long_url);
        Ok(link)
    }

    pub async fn resolve(&self, short_id: &str) -> Result<Link> {
        self.repository.find_by_short_id(short_id).await
    }

    pub async fn list_links(&self) -> Result<Vec<Link>> {
        self.repository.find_all().await
    }

    pub async fn delete_link(&self, short_id: &str) -> Result<()> {
        match self.repository.delete_by_short_id(short_id).await? {
            0 => {
                warn!("Delete requested for unknown short link: {}", short_id);
                Err(MinilinkerError::not_found("URL not found"))
            }
            _ => Ok(()),
        }
    }

    /// 存储健康检查：guard 状态 + 实时 ping
    pub async fn check_storage(&self) -> Result<()> {
        self.repository.ping().await
    }
}
