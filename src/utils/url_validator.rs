//! 目标 URL 校验
//!
//! 只接受可以原样放进 `Location` 头的 http/https 地址。

use url::Url;

/// URL 校验错误
#[derive(Debug, PartialEq, Eq)]
pub enum UrlValidationError {
    EmptyUrl,
    ControlCharacter,
    DangerousProtocol(String),
    InvalidProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "long_url is required"),
            Self::ControlCharacter => write!(f, "long_url must not contain control characters"),
            Self::DangerousProtocol(proto) => write!(f, "Protocol not allowed: {}", proto),
            Self::InvalidProtocol(proto) => write!(
                f,
                "Invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::InvalidFormat(msg) => write!(f, "Invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_PROTOCOLS: &[&str] = &["javascript:", "data:", "file:", "vbscript:", "blob:"];

/// 校验目标 URL，返回应当保存的形式
///
/// `Url::parse` 会静默丢掉制表符和换行，所以控制字符要在解析前单独拒绝。
/// ASCII 地址原样保留；含非 ASCII 字符的地址改存解析后的编码形式
/// （punycode 主机名、百分号编码路径），保证能写进 `Location`。
pub fn validate_url(url: &str) -> Result<String, UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    if url.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url_lower = url.to_ascii_lowercase();

    if let Some(proto) = DANGEROUS_PROTOCOLS.iter().find(|p| url_lower.starts_with(**p)) {
        return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
    }

    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        let proto = url_lower
            .split(':')
            .next()
            .map(|s| format!("{}:", s))
            .unwrap_or_default();
        return Err(UrlValidationError::InvalidProtocol(proto));
    }

    let parsed = Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    if url.is_ascii() {
        Ok(url.to_string())
    } else {
        Ok(parsed.into())
    }
}
