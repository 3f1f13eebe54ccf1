//! 上传文件名清洗
//!
//! 先做 NFKD 分解，再只保留 ASCII，路径分隔符视为空白，
//! 空白折叠成 `_`，去掉 `[A-Za-z0-9_.-]` 以外的字符，再剥掉首尾的 `.` 和 `_`。

use unicode_normalization::UnicodeNormalization;

const WINDOWS_DEVICE_FILES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// 清洗上传文件名，结果可能为空字符串
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();

    let stem = cleaned.split('.').next().unwrap_or_default().to_ascii_uppercase();
    if !cleaned.is_empty() && WINDOWS_DEVICE_FILES.contains(&stem.as_str()) {
        return format!("_{}", cleaned);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_untouched() {
        assert_eq!(sanitize_filename("cat.png"), "cat.png");
        assert_eq!(sanitize_filename("my-photo_01.JPG"), "my-photo_01.JPG");
    }

    #[test]
    fn test_path_components_are_flattened() {
        assert_eq!(sanitize_filename("a/../b.png"), "a_.._b.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("C:\\Windows\\win.ini"), "C_Windows_win.ini");
        assert_eq!(sanitize_filename("/var/www/index.html"), "var_www_index.html");
    }

    #[test]
    fn test_whitespace_and_unsafe_characters() {
        assert_eq!(sanitize_filename("My cool   movie.mov"), "My_cool_movie.mov");
        assert_eq!(sanitize_filename("i<3\"you\".txt"), "i3you.txt");
        assert_eq!(sanitize_filename("caf\u{e9}.png"), "cafe.png");
        assert_eq!(sanitize_filename("\u{fb01}le.png"), "file.png");
        assert_eq!(sanitize_filename("\u{65e5}\u{672c}.png"), "png");
    }

    #[test]
    fn test_degenerate_names_become_empty() {
        assert_eq!(sanitize_filename(""), "");
        assert_eq!(sanitize_filename("../.."), "");
        assert_eq!(sanitize_filename("\u{6587}\u{4ef6}"), "");
    }

    #[test]
    fn test_windows_device_names_are_prefixed() {
        assert_eq!(sanitize_filename("con.txt"), "_con.txt");
        assert_eq!(sanitize_filename("NUL"), "_NUL");
        assert_eq!(sanitize_filename("console.txt"), "console.txt");
    }
}
