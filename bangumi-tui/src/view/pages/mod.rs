//! 各页面的内容区渲染
//!
//! 每个函数只接收自己的页面状态，由 `Page::render` 调用。

pub mod calendar;
pub mod collection;
pub mod help;
pub mod search;
pub mod subject;

use ratatui::text::{Line, Span};

use crate::util::wrap_to_width;
use crate::view::theme::Styles;

/// 字段名列宽
const FIELD_WIDTH: usize = 10;

/// `名字  值` 形式的一行
fn field<'a>(label: &'a str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<FIELD_WIDTH$}"), Styles::label()),
        Span::raw(value.into()),
    ])
}

/// 折行后的多行文本
fn wrapped(text: &str, width: usize, style: ratatui::style::Style) -> Vec<Line<'static>> {
    wrap_to_width(text, width)
        .into_iter()
        .map(|line| Line::styled(line, style))
        .collect()
}

/// 行数减去可见高度，即最大滚动值
fn max_scroll(lines: usize, height: u16) -> u16 {
    u16::try_from(lines.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(30, 20), 10);
        assert_eq!(max_scroll(5, 20), 0);
        assert_eq!(max_scroll(5, 0), 5);
    }
}
