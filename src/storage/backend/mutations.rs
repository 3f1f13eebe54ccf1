//! Mutation operations for LinkRepository
//!
//! This module contains all write database operations.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{error, info};

use super::LinkRepository;
use super::converters::link_to_active_model;
use super::timeout::with_timeout;
use crate::errors::{MinilinkerError, Result};
use crate::storage::Link;

use migration::entities::link;

impl LinkRepository {
    pub async fn insert(&self, new_link: &Link) -> Result<()> {
        let db = self.db()?;

        with_timeout(
            &format!("insert({})", new_link.short_id),
            self.op_timeout(),
            link::Entity::insert(link_to_active_model(new_link)).exec(db),
        )
        .await
        .map_err(|e| {
            error!("写入短链接失败: {}", e);
            MinilinkerError::storage_write(format!("Failed to save link: {}", e))
        })?;

        info!("Short link created: {}", new_link.short_id);
        Ok(())
    }

    /// 删除一条匹配的记录，返回删除数量（0 或 1）
    pub async fn delete_by_short_id(&self, short_id: &str) -> Result<u64> {
        let db = self.db()?;
        let op_name = format!("delete_by_short_id({})", short_id);

        let existing = with_timeout(
            &op_name,
            self.op_timeout(),
            link::Entity::find()
                .filter(link::Column::ShortId.eq(short_id))
                .one(db),
        )
        .await
        .map_err(|e| {
            error!("删除前查询失败: {}", e);
            MinilinkerError::storage_write(format!("Failed to delete link: {}", e))
        })?;

        let Some(model) = existing else {
            return Ok(0);
        };

        let result = with_timeout(
            &op_name,
            self.op_timeout(),
            link::Entity::delete_by_id(model.id).exec(db),
        )
        .await
        .map_err(|e| {
            error!("删除短链接失败: {}", e);
            MinilinkerError::storage_write(format!("Failed to delete link: {}", e))
        })?;

        info!("Short link deleted: {}", short_id);
        Ok(result.rows_affected)
    }
}
