//! HTTP 帮助函数

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use tracing::{debug, error};

use crate::errors::MinilinkerError;

use super::types::{ErrorBody, MessageBody};

/// 请求自身的根地址，形如 `http://host/`
pub fn host_url(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}/", info.scheme(), info.host())
}

/// 从 MinilinkerError 构建 JSON 错误响应
pub fn error_response(err: &MinilinkerError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{} ({})", err, err.code());
    } else {
        debug!("{} ({})", err, err.code());
    }

    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorBody {
            error: err.message().to_string(),
            code: err.code().to_string(),
        })
}

pub fn message_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(MessageBody {
            message: message.into(),
        })
}
