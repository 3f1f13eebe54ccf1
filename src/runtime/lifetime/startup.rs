use crate::config::StaticConfig;
use crate::services::{LinkService, ThumbnailStore};
use crate::storage::{ConnectionGuard, LinkRepository};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub guard: Arc<ConnectionGuard>,
    pub link_service: Arc<LinkService>,
    pub thumbnails: Arc<ThumbnailStore>,
}

/// 准备服务器启动的上下文：上传目录、存储连接与业务服务
///
/// 返回 `Err` 时调用方应以非零状态退出。
pub async fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let thumbnails = Arc::new(
        ThumbnailStore::new(&config.uploads.dir, config.uploads.max_file_size)
            .context("Failed to prepare upload directory")?,
    );
    info!("Thumbnails stored in: {}", thumbnails.dir().display());

    info!("Running in {} environment", config.server.environment);
    let guard = Arc::new(
        ConnectionGuard::establish(&config.database, config.server.environment)
            .await
            .context("Failed to initialize storage")?,
    );

    if guard.is_ready() {
        info!("Using storage backend: {}", guard.backend_name());
    } else {
        warn!(
            "Storage unavailable ({}); only /uploads will be served successfully",
            guard.failure_reason().unwrap_or("unknown reason")
        );
    }

    let repository = LinkRepository::new(guard.clone());
    let link_service = Arc::new(LinkService::new(repository, thumbnails.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        guard,
        link_service,
        thumbnails,
    })
}
