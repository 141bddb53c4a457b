//! 收藏列表页面视图

use bangumi_core::types::{Entry, SubjectType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::model::state::{CollectionPage, Pane};
use crate::model::PagePhase;
use crate::util::truncate_to_width;
use crate::view::theme::{colors, Styles};

use super::{field, max_scroll, wrapped};

/// 渲染收藏列表页面
pub fn render(page: &CollectionPage, frame: &mut Frame, area: Rect) {
    if page.list.entries().is_empty() {
        render_empty(page, frame, area);
        return;
    }

    let [list_area, detail_area] = split(area);
    render_list(page, frame, list_area);
    render_detail(page, frame, detail_area);
}

/// 左侧列表、右侧详情
fn split(area: Rect) -> [Rect; 2] {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    [columns[0], columns[1]]
}

fn detail_block(focused: bool) -> Block<'static> {
    let style = if focused {
        Styles::border_focused()
    } else {
        Styles::border()
    };
    Block::default().borders(Borders::LEFT).border_style(style)
}

/// 详情面板的最大滚动值
pub fn detail_max_scroll(page: &CollectionPage, area: Rect) -> u16 {
    let [_, detail_area] = split(area);
    let inner = detail_block(false).inner(detail_area);
    let lines = page
        .selected_entry()
        .map_or(0, |entry| detail_lines(entry, usize::from(inner.width)).len());
    max_scroll(lines, inner.height)
}

/// 渲染空状态
fn render_empty(page: &CollectionPage, frame: &mut Frame, area: Rect) {
    let text = if page.phase == PagePhase::Loading {
        "Loading...".to_string()
    } else {
        format!("Nothing in {} yet", page.status().label())
    };
    let content = vec![
        Line::from(""),
        Line::styled(format!("  {text}"), Styles::muted()),
        Line::from(""),
        Line::styled("  Press 7 to search, R to refresh", Styles::muted()),
    ];
    frame.render_widget(Paragraph::new(content), area);
}

/// 渲染条目列表
fn render_list(page: &CollectionPage, frame: &mut Frame, area: Rect) {
    let c = colors();

    // 还有未加载的页时在底部留一行提示
    let footer = match page.phase {
        PagePhase::LoadingMore => Some("Loading more...".to_string()),
        _ if page.list.has_more() => Some(format!(
            "{}/{} loaded, n for more",
            page.list.loaded_count(),
            page.list.total()
        )),
        _ => None,
    };
    let (list_area, footer_area) = if footer.is_some() && area.height > 1 {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (rows[0], Some(rows[1]))
    } else {
        (area, None)
    };

    // 高亮符号占两列
    let width = usize::from(list_area.width).saturating_sub(3);
    let items: Vec<ListItem> = page
        .list
        .entries()
        .iter()
        .map(|entry| {
            let mut suffix = format!("  {}/{}", entry.ep_status, total_text(entry));
            if entry.rate > 0 {
                suffix.push_str(&format!(" ★{}", entry.rate));
            }
            let name = truncate_to_width(
                entry.display_name(),
                width.saturating_sub(suffix.width()),
            );
            ListItem::new(Line::from(vec![
                Span::raw(name),
                Span::styled(suffix, Style::default().fg(c.muted)),
            ]))
        })
        .collect();

    let highlight = if page.pane == Pane::List {
        Styles::selected()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let list = List::new(items)
        .highlight_style(highlight)
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(page.selected));
    frame.render_stateful_widget(list, list_area, &mut state);

    if let (Some(text), Some(footer_area)) = (footer, footer_area) {
        frame.render_widget(
            Paragraph::new(Line::styled(format!("  {text}"), Style::default().fg(c.accent))),
            footer_area,
        );
    }
}

/// 渲染选中条目的详情
fn render_detail(page: &CollectionPage, frame: &mut Frame, area: Rect) {
    let block = detail_block(page.pane == Pane::Detail);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(entry) = page.selected_entry() else {
        return;
    };
    let lines = detail_lines(entry, usize::from(inner.width));
    let scroll = page.detail_scroll.min(max_scroll(lines.len(), inner.height));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn total_text(entry: &Entry) -> String {
    match entry.episode_total() {
        0 => "?".to_string(),
        n => n.to_string(),
    }
}

/// 详情内容，已按宽度折行
fn detail_lines(entry: &Entry, width: usize) -> Vec<Line<'static>> {
    let c = colors();
    let subject = &entry.subject;
    // 左侧留一列空白
    let width = width.saturating_sub(1);
    let text_width = width.saturating_sub(super::FIELD_WIDTH);
    let mut lines = Vec::new();

    lines.extend(wrapped(
        entry.display_name(),
        width,
        Style::default().fg(c.fg).add_modifier(Modifier::BOLD),
    ));
    if !subject.name_cn.is_empty() && subject.name_cn != subject.name {
        lines.extend(wrapped(&subject.name, width, Styles::muted()));
    }
    lines.push(Line::from(""));

    let kind = SubjectType::from_code(entry.subject_type).map_or("unknown", SubjectType::name);
    lines.push(field("Type", kind));
    lines.push(field(
        "Status",
        entry.status.map_or("Uncollected", |s| s.label()),
    ));
    lines.push(field(
        "Progress",
        format!("{} / {}", entry.ep_status, total_text(entry)),
    ));
    let rate = if entry.rate > 0 {
        format!("{} / 10", entry.rate)
    } else {
        "-".to_string()
    };
    lines.push(field("Rate", rate));
    if subject.score > 0.0 {
        let rank = if subject.rank > 0 {
            format!("  #{}", subject.rank)
        } else {
            String::new()
        };
        lines.push(field("Score", format!("{:.1}{rank}", subject.score)));
    }
    if let Some(date) = subject.date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(field("Air date", date.to_string()));
    }
    if let Some(updated) = entry.updated_at {
        lines.push(field("Updated", updated.format("%Y-%m-%d %H:%M").to_string()));
    }
    if entry.private {
        lines.push(field("Private", "yes"));
    }
    if !entry.tags.is_empty() {
        let tags = entry.tags.join(" ");
        let mut tag_lines = crate::util::wrap_to_width(&tags, text_width).into_iter();
        if let Some(first) = tag_lines.next() {
            lines.push(field("Tags", first));
        }
        for rest in tag_lines {
            lines.push(field("", rest));
        }
    }

    if !entry.comment.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled("Comment", Styles::label()));
        lines.extend(wrapped(&entry.comment, width, Style::default().fg(c.fg)));
    }

    if !subject.short_summary.is_empty() {
        lines.push(Line::from(""));
        lines.extend(wrapped(&subject.short_summary, width, Styles::muted()));
    }

    // 整体右移一列，与边框隔开
    lines
        .into_iter()
        .map(|line| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(line.spans);
            Line::from(spans).style(line.style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use bangumi_core::session::ListModel;
    use bangumi_core::types::{CollectionStatus, Paged};

    use super::*;

    fn long_entry() -> Entry {
        let mut entry = Entry {
            subject_id: 1,
            ep_status: 3,
            comment: "x".repeat(200),
            ..Entry::default()
        };
        entry.subject.name = "Frieren".to_string();
        entry
    }

    #[test]
    fn test_detail_wraps_to_width() {
        let narrow = detail_lines(&long_entry(), 21).len();
        let wide = detail_lines(&long_entry(), 101).len();
        assert!(narrow > wide);
    }

    #[test]
    fn test_detail_max_scroll_depends_on_height() {
        let mut list = ListModel::new("me", CollectionStatus::Watching, 20);
        list.apply_load(Paged::new(vec![long_entry()], 1, 0, 20));
        let page = CollectionPage::new(list);

        let short = detail_max_scroll(&page, Rect::new(0, 0, 80, 5));
        let tall = detail_max_scroll(&page, Rect::new(0, 0, 80, 200));
        assert!(short > 0);
        assert_eq!(tall, 0);
    }
}
