//! 编辑弹窗组件

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::model::state::{EditField, EditModal};
use crate::model::App;
use crate::util::truncate_to_width;
use crate::view::theme::colors;

const MODAL_WIDTH: u16 = 72;
/// 字段名列宽
const LABEL_WIDTH: usize = 27;

/// 渲染弹窗（如果有活动弹窗）
pub fn render(app: &App, frame: &mut Frame) {
    let Some(modal) = app.modal.get() else {
        return;
    };
    render_edit(frame, modal);
}

/// 计算居中弹窗区域
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// 渲染收藏编辑弹窗
fn render_edit(frame: &mut Frame, modal: &EditModal) {
    let c = colors();

    // 边框(2) + 空行(1) + 字段(6) + 空行(1) + 错误(1) + 按钮(1) + 空行(1)
    let height = 13;
    let area = centered_rect(MODAL_WIDTH, height, frame.area());
    frame.render_widget(Clear, area);

    let title = truncate_to_width(modal.title(), usize::from(MODAL_WIDTH.saturating_sub(8)));
    let block = Block::default()
        .title(format!(" Edit: {title} "))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value_width = usize::from(inner.width).saturating_sub(LABEL_WIDTH + 6);
    let mut lines = vec![Line::from("")];

    for field in EditField::ALL.iter().filter(|f| !f.is_button()) {
        lines.push(field_line(modal, *field, value_width));
    }
    lines.push(Line::from(""));

    match &modal.error {
        Some(error) => lines.push(Line::styled(
            format!("  {}", truncate_to_width(error, usize::from(inner.width).saturating_sub(4))),
            Style::default().fg(c.error),
        )),
        None => lines.push(Line::from("")),
    }

    if modal.saving {
        lines.push(
            Line::styled("Saving...", Style::default().fg(c.accent)).alignment(Alignment::Center),
        );
    } else {
        lines.push(
            Line::from(vec![
                button("Save", modal.focus == EditField::Save),
                Span::raw("    "),
                button("Cancel", modal.focus == EditField::Cancel),
            ])
            .alignment(Alignment::Center),
        );
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// 一个字段：名字 + 值，焦点字段高亮并显示光标或切换箭头
fn field_line(modal: &EditModal, field: EditField, width: usize) -> Line<'static> {
    let c = colors();
    let focused = modal.focus == field;
    let working = modal.working();

    let value = match field {
        EditField::Status => {
            let label = working.status.map_or("Uncollected", |s| s.label());
            if focused {
                format!("◀ {label} ▶")
            } else {
                format!("  {label}")
            }
        }
        EditField::Progress => {
            let total = working.episode_total();
            let total = if total > 0 {
                total.to_string()
            } else {
                "?".to_string()
            };
            format!("{}{} / {total}", modal.progress_input, cursor(focused))
        }
        EditField::Tags => text_value(&modal.tags_input, focused, width),
        EditField::Rate => {
            let rate = if modal.rate_input.is_empty() && !focused {
                "-"
            } else {
                modal.rate_input.as_str()
            };
            format!("{rate}{} / 10", cursor(focused))
        }
        EditField::Comment => text_value(&modal.comment_input, focused, width),
        EditField::Private => {
            let mark = if working.private { "x" } else { " " };
            format!("[{mark}]")
        }
        EditField::Save | EditField::Cancel => String::new(),
    };

    let (marker, label_style, value_style) = if focused {
        (
            "▸ ",
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Style::default().fg(c.muted), Style::default().fg(c.fg))
    };

    Line::from(vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
        Span::styled(value, value_style),
    ])
}

fn cursor(focused: bool) -> &'static str {
    if focused {
        "▎"
    } else {
        ""
    }
}

/// 文本输入：过长时只显示尾部，保证光标可见
fn text_value(text: &str, focused: bool, width: usize) -> String {
    let shown: String = if focused {
        let reversed: String = text.chars().rev().collect();
        truncate_to_width(&reversed, width.saturating_sub(1))
            .chars()
            .rev()
            .collect()
    } else {
        truncate_to_width(text, width)
    };
    format!("{shown}{}", cursor(focused))
}

fn button(label: &str, focused: bool) -> Span<'static> {
    let c = colors();
    let style = if focused {
        Style::default()
            .fg(c.selected_fg)
            .bg(c.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(c.muted)
    };
    Span::styled(format!("[ {label} ]"), style)
}
