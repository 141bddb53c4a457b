//! 搜索页面视图

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::model::state::{SearchFocus, SearchPage};
use crate::model::PagePhase;
use crate::util::truncate_to_width;
use crate::view::theme::{colors, Styles};

/// 渲染搜索页面：两行输入框 + 结果表
pub fn render(page: &SearchPage, frame: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 关键词
            Constraint::Length(1), // 标签
            Constraint::Length(1), // 空行
            Constraint::Min(1),    // 结果
            Constraint::Length(1), // 页脚
        ])
        .split(area);

    render_input(
        frame,
        rows[0],
        "Keyword",
        &page.keyword,
        page.focus == SearchFocus::Keyword,
    );
    render_input(
        frame,
        rows[1],
        "Tags",
        &page.tags,
        page.focus == SearchFocus::Tags,
    );

    if page.results.is_empty() {
        render_empty(page, frame, rows[3]);
    } else {
        render_results(page, frame, rows[3]);
    }
    render_footer(page, frame, rows[4]);
}

fn render_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let c = colors();
    let (marker, label_style) = if focused {
        (
            "▸ ",
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD),
        )
    } else {
        ("  ", Styles::label())
    };
    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<9}"), label_style),
        Span::styled(value.to_string(), Style::default().fg(c.fg)),
    ];
    if focused {
        spans.push(Span::styled("▎", Style::default().fg(c.highlight)));
    } else if value.is_empty() {
        spans.push(Span::styled("-", Styles::muted()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_empty(page: &SearchPage, frame: &mut Frame, area: Rect) {
    let text = match (page.phase, &page.payload) {
        (PagePhase::Loading, _) => "Searching...",
        (_, None) => "Type a keyword or tags and press Enter",
        (_, Some(_)) => "No results",
    };
    frame.render_widget(
        Paragraph::new(Line::styled(format!("  {text}"), Styles::muted())),
        area,
    );
}

fn render_results(page: &SearchPage, frame: &mut Frame, area: Rect) {
    let c = colors();
    let title_width = usize::from(area.width).saturating_sub(40);

    let header = Row::new(["Title", "Type", "Score", "Date", "Tags"])
        .style(Style::default().fg(c.muted).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = page
        .results
        .iter()
        .map(|subject| {
            let score = if subject.rating.score > 0.0 {
                format!("{:.1}", subject.rating.score)
            } else {
                "-".to_string()
            };
            let tags: Vec<&str> = subject.tags.iter().take(3).map(|t| t.name.as_str()).collect();
            Row::new(vec![
                Cell::from(truncate_to_width(subject.display_name(), title_width)),
                Cell::from(subject.kind().map_or("?", |k| k.name())),
                Cell::from(score),
                Cell::from(subject.date.clone().unwrap_or_default()),
                Cell::from(tags.join(" ")),
            ])
        })
        .collect();

    let highlight = if page.focus == SearchFocus::Results {
        Styles::selected()
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .row_highlight_style(highlight)
    .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(page.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(page: &SearchPage, frame: &mut Frame, area: Rect) {
    let c = colors();
    let text = match page.phase {
        PagePhase::LoadingMore => "Loading more...".to_string(),
        _ if page.has_more() => format!(
            "{}/{} shown, n for more",
            page.results.len(),
            page.total
        ),
        _ if page.payload.is_some() => format!("{} results", page.total),
        _ => return,
    };
    frame.render_widget(
        Paragraph::new(Line::styled(format!("  {text}"), Style::default().fg(c.accent))),
        area,
    );
}
