//! 短链接的创建、列表与删除

use actix_multipart::{Field, Multipart};
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{info, trace};

use crate::errors::{MinilinkerError, Result};
use crate::services::{CreateLinkRequest, LinkService, ThumbnailStore, UploadedFile};

use super::helpers::{error_response, host_url, message_response};
use super::types::{CreatedLinkResponse, LinkResponse, ShortenForm};

/// 文本字段上限
const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// POST /shorten
///
/// 接受 multipart/form-data（可带缩略图）或 application/x-www-form-urlencoded。
pub async fn create_link(
    req: HttpRequest,
    payload: web::Payload,
    links: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    let parsed = if is_urlencoded(&req) {
        read_urlencoded_form(&req, payload).await
    } else {
        read_multipart_form(Multipart::new(req.headers(), payload), links.thumbnails()).await
    };

    let create_req = match parsed {
        Ok(create_req) => create_req,
        Err(e) => return error_response(&e),
    };

    match links.create_link(create_req).await {
        Ok(link) => {
            let body = CreatedLinkResponse::from_link(link, &host_url(&req));
            info!("Shortened: {}", body.short_url);
            HttpResponse::Created().json(body)
        }
        Err(e) => error_response(&e),
    }
}

/// GET /api/urls
pub async fn list_links(req: HttpRequest, links: web::Data<Arc<LinkService>>) -> HttpResponse {
    match links.list_links().await {
        Ok(all) => {
            let host = host_url(&req);
            trace!("Listing {} links", all.len());
            let body: Vec<LinkResponse> = all
                .into_iter()
                .map(|link| LinkResponse::from_link(link, &host))
                .collect();
            HttpResponse::Ok().json(body)
        }
        Err(e) => error_response(&e),
    }
}

/// DELETE /api/urls/{short_id}
pub async fn delete_link(
    path: web::Path<String>,
    links: web::Data<Arc<LinkService>>,
) -> HttpResponse {
    match links.delete_link(&path.into_inner()).await {
        Ok(()) => message_response(StatusCode::OK, "URL deleted"),
        Err(e) => error_response(&e),
    }
}

fn is_urlencoded(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

async fn read_urlencoded_form(
    req: &HttpRequest,
    payload: web::Payload,
) -> Result<CreateLinkRequest> {
    let mut payload = payload.into_inner();
    let form = web::Form::<ShortenForm>::from_request(req, &mut payload)
        .await
        .map_err(|e| MinilinkerError::bad_request(format!("Invalid form data: {}", e)))?
        .into_inner();

    Ok(CreateLinkRequest {
        long_url: form.long_url,
        description: form.description,
        thumbnail: None,
    })
}

async fn read_multipart_form(
    mut payload: Multipart,
    thumbnails: &ThumbnailStore,
) -> Result<CreateLinkRequest> {
    let mut create_req = CreateLinkRequest::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "long_url" => create_req.long_url = Some(read_text_field(&mut field).await?),
            "description" => create_req.description = Some(read_text_field(&mut field).await?),
            "thumbnail" => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                    .map(str::to_string);
                let bytes = read_field_bytes(&mut field, thumbnails.max_file_size())
                    .await?
                    .ok_or_else(|| thumbnails.too_large())?;
                create_req.thumbnail = Some(UploadedFile { filename, bytes });
            }
            _ => {
                // 忽略未知字段
            }
        }
    }

    Ok(create_req)
}

/// 读取字段内容，超过上限时返回 `None`
async fn read_field_bytes(field: &mut Field, limit: usize) -> Result<Option<Vec<u8>>> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let bytes = chunk?;
        if data.len() + bytes.len() > limit {
            return Ok(None);
        }
        data.extend_from_slice(&bytes);
    }
    Ok(Some(data))
}

async fn read_text_field(field: &mut Field) -> Result<String> {
    let name = field.name().unwrap_or("").to_string();
    let data = read_field_bytes(field, MAX_TEXT_FIELD_SIZE)
        .await?
        .ok_or_else(|| MinilinkerError::payload_too_large(format!("Field {} is too large", name)))?;

    String::from_utf8(data)
        .map_err(|_| MinilinkerError::bad_request(format!("Field {} is not valid UTF-8", name)))
}
