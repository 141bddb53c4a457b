//! 帮助页面视图

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::HelpPage;
use crate::view::theme::{colors, Styles};

use super::max_scroll as scroll_limit;

/// 按键列宽
const KEY_WIDTH: usize = 16;

/// 渲染帮助页面
pub fn render(page: &HelpPage, frame: &mut Frame, area: Rect) {
    let lines = build_lines(page);
    let scroll = page.scroll.min(scroll_limit(lines.len(), area.height));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

/// 最大滚动值
pub fn max_scroll(page: &HelpPage, area: Rect) -> u16 {
    scroll_limit(build_lines(page).len(), area.height)
}

fn build_lines(page: &HelpPage) -> Vec<Line<'static>> {
    let c = colors();
    let mut lines = vec![Line::from("")];

    for section in page.sections() {
        lines.push(Line::styled(
            format!("  {}", section.title),
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
        ));
        for (key, desc) in section.keys {
            lines.push(Line::from(vec![
                Span::styled(format!("    {key:<KEY_WIDTH$}"), Styles::hint_key()),
                Span::styled(*desc, Style::default().fg(c.fg)),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::styled(
        format!("  Log file: {}", crate::util::log_file_path().display()),
        Styles::muted(),
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_is_listed() {
        let page = HelpPage::new();
        let lines = build_lines(&page);
        let keys: usize = page.sections().iter().map(|s| s.keys.len() + 2).sum();
        assert_eq!(lines.len(), keys + 2);
        assert_eq!(max_scroll(&page, Rect::new(0, 0, 80, 500)), 0);
    }
}
