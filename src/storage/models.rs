use serde::{Deserialize, Serialize};

/// 短链接记录
///
/// 创建后不会被修改，只能整体删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub short_id: String,
    pub long_url: String,
    #[serde(default)]
    pub description: String,
    /// 缩略图文件名，未上传时为空
    #[serde(default)]
    pub thumbnail: String,
}

impl Link {
    pub fn new(
        short_id: impl Into<String>,
        long_url: impl Into<String>,
        description: impl Into<String>,
        thumbnail: impl Into<String>,
    ) -> Self {
        Self {
            short_id: short_id.into(),
            long_url: long_url.into(),
            description: description.into(),
            thumbnail: thumbnail.into(),
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.is_empty()
    }
}
