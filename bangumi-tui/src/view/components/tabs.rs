//! 顶部标签栏

use bangumi_core::types::CollectionStatus;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{App, PageKind, CALENDAR_PAGE, SEARCH_PAGE};
use crate::view::theme::colors;

/// 渲染标签栏：五个收藏列表 + 放送表 + 搜索，右侧为用户名
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let current = app.navigator.current_name();

    let mut tabs: Vec<(String, &str)> = CollectionStatus::ALL
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let name = status.page_name();
            let total = app
                .navigator
                .get(name)
                .and_then(PageKind::as_collection)
                .map_or(0, |p| p.list.total());
            (format!("{} {} ({total})", i + 1, status.label()), name)
        })
        .collect();
    tabs.push(("6 Calendar".to_string(), CALENDAR_PAGE));
    tabs.push(("7 Search".to_string(), SEARCH_PAGE));

    let mut spans = vec![Span::raw(" ")];
    for (label, name) in tabs {
        let style = if current == Some(name) {
            Style::default()
                .fg(c.selected_fg)
                .bg(c.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.muted)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }

    let user = app.user.display_name();
    let user_width = u16::try_from(user.width() + 3).unwrap_or(u16::MAX);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(user_width)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(spans)), columns[0]);
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("@{user} "),
            Style::default().fg(c.accent),
        ))
        .alignment(Alignment::Right),
        columns[1],
    );
}
