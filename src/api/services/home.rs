use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::services::LinkService;

use super::helpers::{error_response, message_response};

/// 服务状态：guard 就绪且数据库可 ping 通
pub async fn home(links: web::Data<Arc<LinkService>>) -> HttpResponse {
    match links.check_storage().await {
        Ok(()) => message_response(StatusCode::OK, "MiniLinker API is running!"),
        Err(e) => error_response(&e),
    }
}
