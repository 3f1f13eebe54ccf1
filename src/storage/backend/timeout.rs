//! 存储操作超时控制
//!
//! 每次数据库往返都有上限，避免请求在连接卡死时无限挂起。

use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use tracing::warn;

/// 在限定时间内执行一次数据库操作，超时转换为 `DbErr::Custom`
pub async fn with_timeout<T, Fut>(operation_name: &str, limit: Duration, operation: Fut) -> Result<T, DbErr>
where
    Fut: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_elapsed) => {
            warn!(
                "Operation '{}' timed out after {} ms",
                operation_name,
                limit.as_millis()
            );
            Err(DbErr::Custom(format!(
                "{} timed out after {} ms",
                operation_name,
                limit.as_millis()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let result = with_timeout("fast", Duration::from_millis(200), async {
            Ok::<_, DbErr>(42)
        })
        .await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_times_out() {
        let result = with_timeout("slow", Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, DbErr>(())
        })
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("slow timed out"));
    }

    #[tokio::test]
    async fn test_passes_through_errors() {
        let result: Result<(), DbErr> = with_timeout("failing", Duration::from_millis(200), async {
            Err(DbErr::Custom("boom".to_string()))
        })
        .await;
        assert!(result.unwrap_err().to_string().contains("boom"));
    }
}
