use crate::storage::Link;
use migration::entities::link;

/// 将 Sea-ORM Model 转换为 Link
pub fn model_to_link(model: link::Model) -> Link {
    Link {
        short_id: model.short_id,
        long_url: model.long_url,
        description: model.description,
        thumbnail: model.thumbnail,
    }
}

/// 将 Link 转换为插入用的 ActiveModel，主键交给数据库生成
pub fn link_to_active_model(link: &Link) -> link::ActiveModel {
    use sea_orm::ActiveValue::*;

    link::ActiveModel {
        id: NotSet,
        short_id: Set(link.short_id.clone()),
        long_url: Set(link.long_url.clone()),
        description: Set(link.description.clone()),
        thumbnail: Set(link.thumbnail.clone()),
    }
}
