//! Thumbnail store
//!
//! Uploaded thumbnails live as plain files in one directory. Names are
//! sanitized before writing; a second upload with the same sanitized name
//! overwrites the first.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{MinilinkerError, Result};
use crate::utils::sanitize_filename;

#[derive(Debug, Clone)]
pub struct ThumbnailStore {
    dir: PathBuf,
    max_file_size: usize,
}

impl ThumbnailStore {
    /// 创建存储，目录不存在时自动创建
    pub fn new(dir: impl Into<PathBuf>, max_file_size: usize) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            MinilinkerError::file_operation(format!(
                "Failed to create upload directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        debug!("Upload directory ready: {}", dir.display());

        Ok(Self { dir, max_file_size })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// 保存上传文件，返回清洗后的文件名
    ///
    /// 未提供文件名（或文件名为空）时不写入，返回空字符串。
    pub async fn save(&self, filename: Option<&str>, bytes: &[u8]) -> Result<String> {
        let Some(original) = filename.filter(|f| !f.is_empty()) else {
            return Ok(String::new());
        };

        let name = sanitize_filename(original);
        if name.is_empty() {
            return Err(MinilinkerError::bad_request(format!(
                "Invalid thumbnail filename: {}",
                original
            )));
        }

        if bytes.len() > self.max_file_size {
            return Err(self.too_large());
        }

        let path = self.dir.join(&name);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            MinilinkerError::file_operation(format!("Failed to save thumbnail {}: {}", name, e))
        })?;

        info!("Thumbnail saved: {} ({} bytes)", name, bytes.len());
        Ok(name)
    }

    /// 查找已保存的缩略图路径
    pub fn resolve(&self, filename: &str) -> Result<PathBuf> {
        // 只接受清洗后的文件名，拒绝任何路径形式
        if filename.is_empty() || sanitize_filename(filename) != filename {
            return Err(MinilinkerError::not_found("File not found"));
        }

        let path = self.dir.join(filename);
        if !path.is_file() {
            return Err(MinilinkerError::not_found("File not found"));
        }

        Ok(path)
    }

    pub fn too_large(&self) -> MinilinkerError {
        MinilinkerError::payload_too_large(format!(
            "Thumbnail exceeds maximum size of {} bytes",
            self.max_file_size
        ))
    }
}
