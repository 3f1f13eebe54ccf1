use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum MinilinkerError {
    BadRequest(String),
    NotFound(String),
    PayloadTooLarge(String),
    StorageUnavailable(String),
    StorageWrite(String),
    StorageQuery(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    FileOperation(String),
    InvalidMultipart(String),
}

impl MinilinkerError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            MinilinkerError::BadRequest(_) => "E001",
            MinilinkerError::NotFound(_) => "E002",
            MinilinkerError::PayloadTooLarge(_) => "E003",
            MinilinkerError::StorageUnavailable(_) => "E004",
            MinilinkerError::StorageWrite(_) => "E005",
            MinilinkerError::StorageQuery(_) => "E006",
            MinilinkerError::DatabaseConfig(_) => "E007",
            MinilinkerError::DatabaseConnection(_) => "E008",
            MinilinkerError::FileOperation(_) => "E009",
            MinilinkerError::InvalidMultipart(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            MinilinkerError::BadRequest(_) => "Bad Request",
            MinilinkerError::NotFound(_) => "Resource Not Found",
            MinilinkerError::PayloadTooLarge(_) => "Payload Too Large",
            MinilinkerError::StorageUnavailable(_) => "Storage Unavailable",
            MinilinkerError::StorageWrite(_) => "Storage Write Error",
            MinilinkerError::StorageQuery(_) => "Storage Query Error",
            MinilinkerError::DatabaseConfig(_) => "Database Configuration Error",
            MinilinkerError::DatabaseConnection(_) => "Database Connection Error",
            MinilinkerError::FileOperation(_) => "File Operation Error",
            MinilinkerError::InvalidMultipart(_) => "Invalid Multipart Data",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            MinilinkerError::BadRequest(msg)
            | MinilinkerError::NotFound(msg)
            | MinilinkerError::PayloadTooLarge(msg)
            | MinilinkerError::StorageUnavailable(msg)
            | MinilinkerError::StorageWrite(msg)
            | MinilinkerError::StorageQuery(msg)
            | MinilinkerError::DatabaseConfig(msg)
            | MinilinkerError::DatabaseConnection(msg)
            | MinilinkerError::FileOperation(msg)
            | MinilinkerError::InvalidMultipart(msg) => msg,
        }
    }

    /// 映射为 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            MinilinkerError::BadRequest(_) | MinilinkerError::InvalidMultipart(_) => {
                StatusCode::BAD_REQUEST
            }
            MinilinkerError::NotFound(_) => StatusCode::NOT_FOUND,
            MinilinkerError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            MinilinkerError::StorageUnavailable(_)
            | MinilinkerError::StorageWrite(_)
            | MinilinkerError::StorageQuery(_)
            | MinilinkerError::DatabaseConfig(_)
            | MinilinkerError::DatabaseConnection(_)
            | MinilinkerError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for MinilinkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for MinilinkerError {}

// 便捷的构造函数
impl MinilinkerError {
    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::BadRequest(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::NotFound(msg.into())
    }

    pub fn payload_too_large<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::PayloadTooLarge(msg.into())
    }

    pub fn storage_unavailable<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::StorageUnavailable(msg.into())
    }

    pub fn storage_write<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::StorageWrite(msg.into())
    }

    pub fn storage_query<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::StorageQuery(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::DatabaseConnection(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        MinilinkerError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for MinilinkerError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => MinilinkerError::NotFound(err.to_string()),
            _ => MinilinkerError::FileOperation(err.to_string()),
        }
    }
}

impl From<actix_multipart::MultipartError> for MinilinkerError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        MinilinkerError::InvalidMultipart(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MinilinkerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_500() {
        for err in [
            MinilinkerError::storage_unavailable("guard failed"),
            MinilinkerError::storage_write("insert failed"),
            MinilinkerError::storage_query("select failed"),
        ] {
            assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_client_errors() {
        assert_eq!(
            MinilinkerError::bad_request("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            MinilinkerError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            MinilinkerError::payload_too_large("x").http_status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_io_not_found_becomes_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(
            MinilinkerError::from(io),
            MinilinkerError::NotFound(_)
        ));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            MinilinkerError::from(io),
            MinilinkerError::FileOperation(_)
        ));
    }

    #[test]
    fn test_format_simple() {
        let err = MinilinkerError::storage_unavailable("no connection");
        assert_eq!(err.code(), "E004");
        assert_eq!(err.to_string(), "Storage Unavailable: no connection");
    }
}
