//! 底部状态栏组件

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::Pane;
use crate::model::{App, PageKind, PagePhase};
use crate::view::theme::{colors, Styles};

/// 渲染状态栏
pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let separator = || Span::styled(" │ ", Style::default().fg(c.border));
    let mut spans = vec![Span::raw(" ")];

    // 通知优先显示在左侧，没有通知时显示加载状态
    if let Some(notification) = app.notification.current() {
        spans.push(Span::styled(
            notification.text.clone(),
            Style::default().fg(c.notification(notification.level)),
        ));
        spans.push(separator());
    } else if let Some(text) = loading_text(app) {
        spans.push(Span::styled(text, Style::default().fg(c.accent)));
        spans.push(separator());
    }

    for (i, (key, desc)) in hints(app).iter().enumerate() {
        if i > 0 {
            spans.push(separator());
        }
        spans.push(Span::styled(*key, Styles::hint_key()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(*desc, Styles::hint_desc()));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Styles::statusbar());
    frame.render_widget(paragraph, area);
}

fn loading_text(app: &App) -> Option<&'static str> {
    if app.modal.get().is_some_and(|m| m.saving) {
        return Some("Saving...");
    }
    match app.navigator.current()?.phase() {
        PagePhase::Loading => Some("Loading..."),
        PagePhase::LoadingMore => Some("Loading more..."),
        PagePhase::Ready | PagePhase::Editing => None,
    }
}

/// 根据当前状态生成快捷键提示
fn hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.modal.is_open() {
        return vec![
            ("Tab", "Next field"),
            ("←→", "Change"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ];
    }

    let mut hints = Vec::new();
    match app.navigator.current() {
        Some(PageKind::Collection(page)) => match page.pane {
            Pane::List => {
                hints.push(("j/k", "Select"));
                hints.push(("Enter", "Open"));
                hints.push(("e", "Edit"));
                if page.list.has_more() {
                    hints.push(("n", "More"));
                }
                hints.push(("l", "Detail"));
            }
            Pane::Detail => {
                hints.push(("j/k", "Scroll"));
                hints.push(("h", "List"));
                hints.push(("e", "Edit"));
            }
        },
        Some(PageKind::Calendar(_)) => {
            hints.push(("j/k", "Select"));
            hints.push(("Enter", "Open"));
        }
        Some(PageKind::Subject(_)) => {
            hints.push(("j/k", "Scroll"));
            hints.push(("e", "Edit"));
        }
        Some(PageKind::Search(page)) => {
            if page.focus.is_input() {
                hints.push(("Enter", "Search"));
                hints.push(("Tab", "Next field"));
                hints.push(("Esc", "Results"));
                // 输入框持有焦点时全局快捷键不可用
                hints.push(("Ctrl+C", "Quit"));
                return hints;
            }
            hints.push(("Enter", "Open"));
            if page.has_more() {
                hints.push(("n", "More"));
            }
            hints.push(("/", "Query"));
        }
        Some(PageKind::Help(_)) => {
            hints.push(("j/k", "Scroll"));
        }
        None => {}
    }

    if !app.navigator.history().is_empty() {
        hints.push(("Esc", "Back"));
    }

    hints.push(("1-7", "Pages"));
    hints.push(("R", "Refresh"));
    hints.push(("?", "Help"));
    hints.push(("Q", "Quit"));
    hints
}
