//! 主布局渲染

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{App, Page};

use super::components;
use super::theme::{colors, Styles};

/// 标签栏、内容区、状态栏
fn split(area: Rect) -> [Rect; 3] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标签栏
            Constraint::Min(1),    // 内容区
            Constraint::Length(1), // 状态栏
        ])
        .split(area);
    [rows[0], rows[1], rows[2]]
}

/// 页面实际可用的区域（去掉边框）
///
/// Update 层用它计算滚动上限，必须与 `render` 保持一致。
pub fn content_area(area: Rect) -> Rect {
    let [_, content, _] = split(area);
    Block::default().borders(Borders::ALL).inner(content)
}

/// 渲染主布局
pub fn render(app: &App, frame: &mut Frame) {
    let [tabs_area, content_area, status_area] = split(frame.area());

    components::tabs::render(app, frame, tabs_area);
    render_page(app, frame, content_area);
    components::statusbar::render(app, frame, status_area);

    // 弹窗在最上层
    components::modal::render(app, frame);
}

/// 渲染当前页面
fn render_page(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();

    let Some(page) = app.navigator.current() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(c.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Line::styled("  Nothing to show", Style::default().fg(c.muted))),
            inner,
        );
        return;
    };
    let page = page.as_page();

    let border_style = if app.modal.is_open() {
        Styles::border()
    } else {
        Styles::border_focused()
    };

    let block = Block::default()
        .title(format!(" {} ", page.title()))
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    page.render(frame, inner);
}
