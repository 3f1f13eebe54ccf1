use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// 运行环境
///
/// production 下缺失数据库地址直接拒绝启动；development 下允许回退到本地 SQLite。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RunEnvironment {
    #[default]
    Production,
    Development,
}

/// 启动时数据库连接失败的处理策略
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConnectFailurePolicy {
    /// 继续运行，依赖存储的接口逐个返回 500
    #[default]
    Degrade,
    /// 视为致命错误，进程退出
    Exit,
}

/// 开发模式下未配置数据库时使用的地址
pub const DEV_FALLBACK_DATABASE_URL: &str = "sqlite://data/minilinker.db?mode=rwc";

/// 静态配置（启动时加载一次）
///
/// 优先级：ENV > config.toml > 默认值
/// ENV 前缀：ML，分隔符：__
/// 示例：ML__SERVER__PORT=9000
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub uploads: UploadConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置，文件不存在时只使用环境变量和默认值
    pub fn load(path: &str) -> Result<Self, config::ConfigError> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("ML")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: StaticConfig = settings.try_deserialize()?;

        // 兼容常见部署方式：直接提供 DATABASE_URL
        if config.database.configured_url().is_none()
            && let Ok(url) = std::env::var("DATABASE_URL")
            && !url.trim().is_empty()
        {
            config.database.url = Some(url);
        }

        if std::path::Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        let mut sample = Self::default();
        sample.database.url = Some("sqlite://data/minilinker.db?mode=rwc".to_string());
        toml::to_string_pretty(&sample)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub environment: RunEnvironment,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    /// 单次存储操作及连接步骤的超时（秒）
    #[serde(default = "default_database_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub on_connect_failure: ConnectFailurePolicy,
}

impl DatabaseConfig {
    /// 去除空白后仍非空的数据库地址
    pub fn configured_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// 缩略图上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_upload_dir")]
    pub dir: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default)]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    5000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_database_timeout() -> u64 {
    5
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_file_size() -> usize {
    5 * 1024 * 1024
}

fn default_cors_enabled() -> bool {
    true
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            environment: RunEnvironment::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: default_database_pool_size(),
            timeout: default_database_timeout(),
            on_connect_failure: ConnectFailurePolicy::default(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = StaticConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, RunEnvironment::Production);
        assert_eq!(config.database.on_connect_failure, ConnectFailurePolicy::Degrade);
        assert_eq!(config.uploads.dir, "uploads");
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_configured_url_ignores_blank() {
        let mut db = DatabaseConfig::default();
        assert_eq!(db.configured_url(), None);

        db.url = Some("   ".to_string());
        assert_eq!(db.configured_url(), None);

        db.url = Some(" sqlite://links.db ".to_string());
        assert_eq!(db.configured_url(), Some("sqlite://links.db"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(
            RunEnvironment::from_str("Development").unwrap(),
            RunEnvironment::Development
        );
        assert_eq!(
            ConnectFailurePolicy::from_str("exit").unwrap(),
            ConnectFailurePolicy::Exit
        );
        assert!(RunEnvironment::from_str("staging").is_err());
        assert_eq!(RunEnvironment::Production.to_string(), "production");
    }

    #[test]
    fn test_sample_config_round_trips() {
        let sample = StaticConfig::generate_sample_config();
        assert!(sample.contains("[database]"));

        let parsed: StaticConfig = toml::from_str(&sample).unwrap();
        assert_eq!(
            parsed.database.configured_url(),
            Some("sqlite://data/minilinker.db?mode=rwc")
        );
    }
}
