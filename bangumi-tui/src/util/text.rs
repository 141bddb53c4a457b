//! 按显示宽度处理文本
//!
//! 条目名大多是中日文，一个字符占两列，不能按字符数截断。

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 截断到不超过 `max_width` 列，被截断时以 `…` 结尾
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// 按显示宽度折行，保留原有的换行
///
/// `width` 为 0 时不折行。
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        let raw = raw.trim_end();
        if width == 0 || raw.width() <= width {
            lines.push(raw.to_string());
            continue;
        }

        let mut used = 0;
        let mut current = String::new();
        for ch in raw.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            used += w;
            current.push(ch);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
    }

    #[test]
    fn test_wide_chars() {
        // 每个汉字两列：4 列预算只放得下一个字加省略号
        assert_eq!(truncate_to_width("孤独摇滚", 4), "孤…");
        assert_eq!(truncate_to_width("孤独摇滚", 8), "孤独摇滚");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_wrap_keeps_paragraphs() {
        assert_eq!(wrap_to_width("ab\n\ncd", 10), ["ab", "", "cd"]);
    }

    #[test]
    fn test_wrap_wide_chars() {
        assert_eq!(wrap_to_width("孤独摇滚", 5), ["孤独", "摇滚"]);
        assert_eq!(wrap_to_width("abcdef", 4), ["abcd", "ef"]);
        assert_eq!(wrap_to_width("abcdef", 0), ["abcdef"]);
    }
}
