//! Query operations for LinkRepository
//!
//! This module contains all read-only database operations.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{debug, error, trace};

use super::LinkRepository;
use super::converters::model_to_link;
use super::timeout::with_timeout;
use crate::errors::{MinilinkerError, Result};
use crate::storage::Link;

use migration::entities::link;

impl LinkRepository {
    pub async fn find_by_short_id(&self, short_id: &str) -> Result<Link> {
        let db = self.db()?;

        let model = with_timeout(
            &format!("find_by_short_id({})", short_id),
            self.op_timeout(),
            link::Entity::find()
                .filter(link::Column::ShortId.eq(short_id))
                .one(db),
        )
        .await
        .map_err(|e| {
            error!("查询短链接失败: {}", e);
            MinilinkerError::storage_query(format!("Failed to look up link: {}", e))
        })?;

        match model {
            Some(model) => Ok(model_to_link(model)),
            None => {
                debug!("Short link not found: {}", short_id);
                Err(MinilinkerError::not_found("URL not found"))
            }
        }
    }

    /// 加载全部短链接，顺序由数据库决定
    pub async fn find_all(&self) -> Result<Vec<Link>> {
        let db = self.db()?;

        let models = with_timeout("find_all", self.op_timeout(), link::Entity::find().all(db))
            .await
            .map_err(|e| {
                error!("加载所有短链接失败: {}", e);
                MinilinkerError::storage_query(format!("Failed to load links: {}", e))
            })?;

        trace!("Loaded {} short links", models.len());
        Ok(models.into_iter().map(model_to_link).collect())
    }

    /// 实时探测连接是否可用
    pub async fn ping(&self) -> Result<()> {
        let db = self.db()?;

        with_timeout("ping", self.op_timeout(), db.ping())
            .await
            .map_err(|e| {
                error!("Storage ping failed: {}", e);
                MinilinkerError::storage_unavailable("Storage is unreachable")
            })
    }
}
