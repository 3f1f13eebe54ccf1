//! HTTP 请求/响应类型

use serde::{Deserialize, Serialize};

use crate::storage::Link;

/// 所有失败响应的 JSON 结构
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct MessageBody {
    pub message: String,
}

/// urlencoded 表单（不含文件）
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ShortenForm {
    pub long_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CreatedLinkResponse {
    pub short_url: String,
    pub description: String,
    pub thumbnail: String,
}

impl CreatedLinkResponse {
    pub fn from_link(link: Link, host_url: &str) -> Self {
        Self {
            short_url: format!("{}{}", host_url, link.short_id),
            description: link.description,
            thumbnail: link.thumbnail,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LinkResponse {
    pub short_id: String,
    pub short_url: String,
    pub long_url: String,
    pub description: String,
    pub thumbnail_url: String,
}

impl LinkResponse {
    pub fn from_link(link: Link, host_url: &str) -> Self {
        let thumbnail_url = if link.has_thumbnail() {
            format!("{}uploads/{}", host_url, link.thumbnail)
        } else {
            String::new()
        };

        Self {
            short_url: format!("{}{}", host_url, link.short_id),
            short_id: link.short_id,
            long_url: link.long_url,
            description: link.description,
            thumbnail_url,
        }
    }
}
