//! 日志输出截断

/// 响应体在日志中保留的最大字节数
const TRUNCATE_LIMIT: usize = 512;

/// 向前找到不超过 `index` 的字符边界
fn floor_char_boundary(s: &str, index: usize) -> usize {
    let mut i = index.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// 截断过长的文本，避免日志被大响应体淹没
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}
