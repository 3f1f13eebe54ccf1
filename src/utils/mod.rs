pub mod filename;
pub mod url_validator;

pub use filename::sanitize_filename;
pub use url_validator::validate_url;

/// 短码长度
pub const SHORT_ID_LENGTH: usize = 8;

/// 生成短码：取随机 UUID v4 十六进制形式的前 8 位
///
/// 不做唯一性检查，碰撞概率约为 1/2^32。
pub fn generate_short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(SHORT_ID_LENGTH);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_short_id_shape() {
        let id = generate_short_id();
        assert_eq!(id.len(), SHORT_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_short_ids_differ() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_short_id()).collect();
        assert!(ids.len() > 990);
    }
}
