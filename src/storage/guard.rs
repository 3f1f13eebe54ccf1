//! Connection lifecycle guard
//!
//! The storage connection is opened exactly once, at startup: connect, probe
//! with `ping`, then run migrations. The outcome is frozen into a
//! [`ConnectionGuard`] that is either Ready (holding the pool) or Failed
//! (holding only the reason). There is no reconnection afterwards.

use std::time::Duration;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use super::backend::{connect_generic, connect_sqlite, infer_backend_from_url, run_migrations};
use crate::config::{
    ConnectFailurePolicy, DEV_FALLBACK_DATABASE_URL, DatabaseConfig, RunEnvironment,
};
use crate::errors::{MinilinkerError, Result};

const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// 按运行环境决定实际使用的数据库地址
///
/// production 下未配置地址返回 `DatabaseConfig` 错误；development 下回退到本地 SQLite。
pub fn resolve_database_url(config: &DatabaseConfig, environment: RunEnvironment) -> Result<String> {
    match (config.configured_url(), environment) {
        (Some(url), _) => Ok(url.to_string()),
        (None, RunEnvironment::Development) => {
            warn!(
                "database.url is not set, falling back to {} (development only)",
                DEV_FALLBACK_DATABASE_URL
            );
            Ok(DEV_FALLBACK_DATABASE_URL.to_string())
        }
        (None, RunEnvironment::Production) => Err(MinilinkerError::database_config(
            "database.url is not set (ML__DATABASE__URL or DATABASE_URL); \
             refusing to start in production",
        )),
    }
}

/// 启动步骤统一受 `database.timeout` 约束
async fn bounded_step<T, F>(limit: Duration, step: &str, fut: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| MinilinkerError::database_connection(format!("{} timed out", step)))?
}

enum GuardState {
    Ready(DatabaseConnection),
    Failed(String),
}

pub struct ConnectionGuard {
    state: GuardState,
    backend_name: String,
    op_timeout: Duration,
}

impl ConnectionGuard {
    /// 启动时建立连接并探测
    ///
    /// 只有两种情况返回 `Err`（调用方应终止进程）：
    /// - production 环境下未配置数据库地址
    /// - 连接失败且策略为 `ConnectFailurePolicy::Exit`
    ///
    /// 其余失败都会得到一个 Failed 状态的 guard。
    pub async fn establish(config: &DatabaseConfig, environment: RunEnvironment) -> Result<Self> {
        let op_timeout = Duration::from_secs(config.timeout.max(1));

        let database_url = resolve_database_url(config, environment)?;

        match Self::open(&database_url, config, op_timeout).await {
            Ok((db, backend_name)) => {
                info!("{} storage ready", backend_name.to_uppercase());
                Ok(Self::ready(db, backend_name, op_timeout))
            }
            Err(e) => {
                error!("Storage connection failed: {}", e);
                match config.on_connect_failure {
                    ConnectFailurePolicy::Exit => Err(e),
                    ConnectFailurePolicy::Degrade => {
                        warn!("Continuing without storage; storage-backed endpoints will return 500");
                        Ok(Self::failed(e.to_string()))
                    }
                }
            }
        }
    }

    async fn open(
        database_url: &str,
        config: &DatabaseConfig,
        op_timeout: Duration,
    ) -> Result<(DatabaseConnection, String)> {
        let backend_name = infer_backend_from_url(database_url)?;

        let connect = async {
            if backend_name == "sqlite" {
                connect_sqlite(database_url, op_timeout).await
            } else {
                connect_generic(database_url, &backend_name, config.pool_size, op_timeout).await
            }
        };
        let db = bounded_step(
            op_timeout,
            &format!("Connecting to {}", backend_name.to_uppercase()),
            connect,
        )
        .await?;

        bounded_step(op_timeout, "Health probe", async {
            db.ping().await.map_err(|e| {
                MinilinkerError::database_connection(format!("Health probe failed: {}", e))
            })
        })
        .await?;

        bounded_step(op_timeout, "Migrations", run_migrations(&db)).await?;

        Ok((db, backend_name))
    }

    pub fn ready(
        db: DatabaseConnection,
        backend_name: impl Into<String>,
        op_timeout: Duration,
    ) -> Self {
        Self {
            state: GuardState::Ready(db),
            backend_name: backend_name.into(),
            op_timeout,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            state: GuardState::Failed(reason.into()),
            backend_name: "none".to_string(),
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, GuardState::Ready(_))
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.state {
            GuardState::Ready(_) => None,
            GuardState::Failed(reason) => Some(reason),
        }
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// 取得可用连接；guard 处于 Failed 时返回 `StorageUnavailable`
    pub fn connection(&self) -> Result<&DatabaseConnection> {
        match &self.state {
            GuardState::Ready(db) => Ok(db),
            GuardState::Failed(_) => Err(MinilinkerError::storage_unavailable(
                "Storage connection is not available",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_guard_refuses_connection() {
        let guard = ConnectionGuard::failed("connection refused");

        assert!(!guard.is_ready());
        assert_eq!(guard.failure_reason(), Some("connection refused"));
        assert!(matches!(
            guard.connection(),
            Err(MinilinkerError::StorageUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_url_is_fatal_in_production() {
        let config = DatabaseConfig::default();

        let result = ConnectionGuard::establish(&config, RunEnvironment::Production).await;

        assert!(matches!(result, Err(MinilinkerError::DatabaseConfig(_))));
    }

    #[test]
    fn test_development_falls_back_to_sqlite() {
        let config = DatabaseConfig::default();

        let url = resolve_database_url(&config, RunEnvironment::Development).unwrap();
        assert_eq!(url, DEV_FALLBACK_DATABASE_URL);

        let config = DatabaseConfig {
            url: Some(" sqlite://custom.db ".to_string()),
            ..Default::default()
        };
        let url = resolve_database_url(&config, RunEnvironment::Development).unwrap();
        assert_eq!(url, "sqlite://custom.db");
    }

    #[tokio::test]
    async fn test_hanging_startup_step_times_out() {
        let result: Result<()> = bounded_step(
            Duration::from_millis(20),
            "Migrations",
            std::future::pending(),
        )
        .await;

        match result {
            Err(MinilinkerError::DatabaseConnection(msg)) => {
                assert_eq!(msg, "Migrations timed out")
            }
            _ => panic!("expected a DatabaseConnection timeout"),
        }
    }

    #[tokio::test]
    async fn test_unknown_scheme_degrades() {
        let config = DatabaseConfig {
            url: Some("mongodb://mongo:27017/url_shortener".to_string()),
            ..Default::default()
        };

        let guard = ConnectionGuard::establish(&config, RunEnvironment::Production)
            .await
            .unwrap();

        assert!(!guard.is_ready());
        assert!(guard.failure_reason().unwrap().contains("mongodb://"));
    }

    #[tokio::test]
    async fn test_unknown_scheme_exits_when_configured() {
        let config = DatabaseConfig {
            url: Some("mongodb://mongo:27017/url_shortener".to_string()),
            on_connect_failure: ConnectFailurePolicy::Exit,
            ..Default::default()
        };

        let result = ConnectionGuard::establish(&config, RunEnvironment::Production).await;

        assert!(matches!(result, Err(MinilinkerError::DatabaseConfig(_))));
    }
}
