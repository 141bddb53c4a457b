//! 放送表页面视图

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::state::CalendarPage;
use crate::util::truncate_to_width;
use crate::view::theme::{colors, Styles};

/// 渲染放送表
pub fn render(page: &CalendarPage, frame: &mut Frame, area: Rect) {
    if page.item_count() == 0 {
        render_empty(page, frame, area);
        return;
    }

    let (lines, selected_line) = build_lines(page, usize::from(area.width));
    let scroll = scroll_for(selected_line, area.height);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn render_empty(page: &CalendarPage, frame: &mut Frame, area: Rect) {
    let c = colors();
    let mut content = vec![Line::from("")];
    match &page.error {
        Some(error) => {
            content.push(Line::styled(
                format!("  Failed to load calendar: {error}"),
                Style::default().fg(c.error),
            ));
            content.push(Line::from(""));
            content.push(Line::styled("  Press R to retry", Styles::muted()));
        }
        None => content.push(Line::styled("  No broadcasts this week", Styles::muted())),
    }
    frame.render_widget(Paragraph::new(content), area);
}

/// 让选中行保持在可见区域内
fn scroll_for(selected_line: usize, height: u16) -> u16 {
    let height = usize::from(height);
    if height == 0 || selected_line < height {
        return 0;
    }
    u16::try_from(selected_line + 1 - height).unwrap_or(u16::MAX)
}

/// 每天一个标题行加若干条目行，返回所有行与选中条目所在的行号
fn build_lines(page: &CalendarPage, width: usize) -> (Vec<Line<'static>>, usize) {
    let c = colors();
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut index = 0;

    for day in &page.days {
        let today = page.is_today(day);
        let heading_style = if today {
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.fg).add_modifier(Modifier::BOLD)
        };
        let mut heading = vec![Span::styled(
            format!(" {} {}", day.weekday.en, day.weekday.cn),
            heading_style,
        )];
        if today {
            heading.push(Span::styled("  today", Style::default().fg(c.accent)));
        }
        lines.push(Line::from(heading));

        if day.items.is_empty() {
            lines.push(Line::styled("     -", Styles::muted()));
        }
        for item in &day.items {
            let is_selected = index == page.selected;
            if is_selected {
                selected_line = lines.len();
            }

            let score = item
                .rating
                .as_ref()
                .filter(|r| r.score > 0.0)
                .map_or_else(|| "  -".to_string(), |r| format!("{:>4.1}", r.score));
            let suffix = format!("  {score}  {:>6}", item.followers());
            let marker = if is_selected { " ▸ " } else { "   " };
            let name_width = width.saturating_sub(marker.width() + suffix.width() + 1);
            let name = truncate_to_width(item.display_name(), name_width);
            let padding = " ".repeat(name_width.saturating_sub(name.width()));

            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(name),
                Span::raw(padding),
                Span::styled(suffix, Style::default().fg(c.muted)),
            ]);
            lines.push(if is_selected {
                line.style(Styles::selected())
            } else {
                line
            });
            index += 1;
        }
        lines.push(Line::from(""));
    }

    (lines, selected_line)
}

#[cfg(test)]
mod tests {
    use bangumi_core::types::{CalendarDay, CalendarItem, Weekday};

    use super::*;

    fn day(id: u32, n: u32) -> CalendarDay {
        CalendarDay {
            weekday: Weekday {
                id,
                ..Weekday::default()
            },
            items: (0..n)
                .map(|i| CalendarItem {
                    id: id * 100 + i,
                    ..CalendarItem::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_selected_line_skips_headings() {
        let mut page = CalendarPage::new(vec![day(1, 2), day(2, 2)], 1);
        page.selected = 2;
        let (_, line) = build_lines(&page, 40);
        // 标题、两个条目、空行、标题，然后是第二天的第一个条目
        assert_eq!(line, 5);
    }

    #[test]
    fn test_scroll_keeps_selection_visible() {
        assert_eq!(scroll_for(3, 10), 0);
        assert_eq!(scroll_for(10, 10), 1);
        assert_eq!(scroll_for(25, 10), 16);
    }
}
