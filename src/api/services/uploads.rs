use actix_files::NamedFile;
use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::errors::MinilinkerError;
use crate::services::ThumbnailStore;

use super::helpers::error_response;

/// 读取上传目录中的缩略图，不依赖数据库
pub async fn serve_thumbnail(
    req: HttpRequest,
    path: web::Path<String>,
    thumbnails: web::Data<Arc<ThumbnailStore>>,
) -> HttpResponse {
    let file_path = match thumbnails.resolve(&path.into_inner()) {
        Ok(file_path) => file_path,
        Err(e) => return error_response(&e),
    };

    match NamedFile::open_async(&file_path).await {
        Ok(file) => file.into_response(&req),
        Err(e) => error_response(&MinilinkerError::from(e)),
    }
}
