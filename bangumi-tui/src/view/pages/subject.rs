//! 条目详情页面视图

use bangumi_core::types::Episode;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::state::{EpisodeAirState, SubjectPage};
use crate::util::truncate_to_width;
use crate::view::theme::{colors, Styles};

use super::{field, max_scroll as scroll_limit, wrapped};

/// 渲染条目详情
pub fn render(page: &SubjectPage, frame: &mut Frame, area: Rect) {
    let lines = build_lines(page, usize::from(area.width));
    let scroll = page.scroll.min(scroll_limit(lines.len(), area.height));
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

/// 最大滚动值
pub fn max_scroll(page: &SubjectPage, area: Rect) -> u16 {
    scroll_limit(build_lines(page, usize::from(area.width)).len(), area.height)
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::styled(
        text.into(),
        Style::default()
            .fg(colors().highlight)
            .add_modifier(Modifier::BOLD),
    )
}

/// 全部内容，已按宽度折行
fn build_lines(page: &SubjectPage, width: usize) -> Vec<Line<'static>> {
    let c = colors();
    let subject = &page.subject;
    let width = width.saturating_sub(1);
    let mut lines = Vec::new();

    // ========== 基本信息 ==========

    lines.extend(wrapped(
        subject.display_name(),
        width,
        Style::default().fg(c.fg).add_modifier(Modifier::BOLD),
    ));
    if !subject.name_cn.is_empty() && subject.name_cn != subject.name {
        lines.extend(wrapped(&subject.name, width, Styles::muted()));
    }
    lines.push(Line::from(""));

    let kind = subject.kind().map_or("unknown", |k| k.name());
    lines.push(field("Type", kind));
    if let Some(date) = subject.date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(field("Air date", date.to_string()));
    }
    if !subject.platform.is_empty() {
        lines.push(field("Platform", subject.platform.clone()));
    }
    let episodes = match subject.episode_count() {
        0 => "?".to_string(),
        n => n.to_string(),
    };
    lines.push(field("Episodes", episodes.clone()));
    if subject.rating.score > 0.0 {
        let mut score = format!("{:.1} ({} votes)", subject.rating.score, subject.rating.total);
        if subject.rating.rank > 0 {
            score = format!("{score}  #{}", subject.rating.rank);
        }
        lines.push(field("Score", score));
    }
    lines.push(field(
        "Collected",
        format!("{} users", subject.collection_total()),
    ));
    if subject.nsfw {
        lines.push(field("NSFW", "yes"));
    }
    if !subject.tags.is_empty() {
        let tags: Vec<&str> = subject.tags.iter().take(8).map(|t| t.name.as_str()).collect();
        let text = truncate_to_width(&tags.join(" "), width.saturating_sub(super::FIELD_WIDTH));
        lines.push(field("Tags", text));
    }
    lines.push(Line::from(""));

    // ========== 我的收藏 ==========

    lines.push(heading("My collection"));
    if page.collected {
        let entry = &page.entry;
        lines.push(field(
            "Status",
            entry.status.map_or("Uncollected", |s| s.label()),
        ));
        lines.push(field(
            "Progress",
            format!("{} / {episodes}", entry.ep_status),
        ));
        let rate = if entry.rate > 0 {
            format!("{} / 10", entry.rate)
        } else {
            "-".to_string()
        };
        lines.push(field("Rate", rate));
        if !entry.tags.is_empty() {
            let text = truncate_to_width(
                &entry.tags.join(" "),
                width.saturating_sub(super::FIELD_WIDTH),
            );
            lines.push(field("Tags", text));
        }
        if entry.private {
            lines.push(field("Private", "yes"));
        }
        if !entry.comment.is_empty() {
            lines.extend(wrapped(&entry.comment, width, Style::default().fg(c.fg)));
        }
    } else {
        lines.push(Line::styled("Not collected, press e to add", Styles::muted()));
    }
    lines.push(Line::from(""));

    // ========== 章节 ==========

    lines.push(heading(format!("Episodes ({})", page.main_episode_count())));
    if let Some(error) = &page.episodes_error {
        lines.extend(wrapped(
            &format!("Failed to load episodes: {error}"),
            width,
            Style::default().fg(c.error),
        ));
    } else if page.episodes.is_empty() {
        lines.push(Line::styled("No episode data", Styles::muted()));
    }
    for episode in &page.episodes {
        lines.push(episode_line(page, episode, width));
    }
    lines.push(Line::from(""));

    // ========== 简介 ==========

    if !subject.summary.is_empty() {
        lines.push(heading("Summary"));
        lines.extend(wrapped(&subject.summary, width, Style::default().fg(c.fg)));
    }

    lines
        .into_iter()
        .map(|line| {
            let mut spans = vec![Span::raw(" ")];
            spans.extend(line.spans);
            Line::from(spans).style(line.style)
        })
        .collect()
}

/// 本篇章节是否已看（按集数与进度比较）
fn is_watched(page: &SubjectPage, episode: &Episode) -> bool {
    let number = episode.ep.unwrap_or(episode.sort);
    episode.is_main() && number > 0.0 && number <= f64::from(page.entry.ep_status)
}

fn episode_line(page: &SubjectPage, episode: &Episode, width: usize) -> Line<'static> {
    let c = colors();
    let watched = is_watched(page, episode);
    let state = page.air_state(episode);

    let mark = if watched { "✓" } else { " " };
    let number = if episode.is_main() {
        format!("{:>4}", episode.ep.unwrap_or(episode.sort))
    } else {
        format!("SP{:>2}", episode.sort)
    };
    let date = if episode.airdate.is_empty() {
        "----------".to_string()
    } else {
        episode.airdate.clone()
    };
    let name_width = width.saturating_sub(22);
    let name = truncate_to_width(episode.display_name(), name_width);

    let style = match state {
        _ if watched => Style::default().fg(c.success),
        EpisodeAirState::Aired => Style::default().fg(c.fg),
        EpisodeAirState::Today => Style::default().fg(c.accent).add_modifier(Modifier::BOLD),
        EpisodeAirState::Upcoming | EpisodeAirState::Unknown => Styles::muted(),
    };

    Line::from(vec![
        Span::styled(format!("{mark} {number}  "), style),
        Span::styled(format!("{date}  "), Styles::muted()),
        Span::styled(name, style),
    ])
}
