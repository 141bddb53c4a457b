//! `subject`：单个条目的信息、收藏状态与编辑

use std::collections::HashSet;

use anyhow::{Context, Result};
use bangumi_core::session::{CommitOutcome, EditSession};
use bangumi_core::types::{
    CollectionStatus, Entry, Episode, EpisodeCollectionType, Subject, UserEpisode,
};

use super::episodes_label;
use crate::backend::CoreService;
use crate::cli::EditArgs;

/// 章节格子每行个数
const GRID_COLUMNS: usize = 10;
const USER_EPISODE_LIMIT: u32 = 100;

// ========== info ==========

pub fn info(backend: &CoreService, id: u32) -> Result<()> {
    let subject = backend
        .block_on(backend.subject().get(id))
        .with_context(|| format!("Failed to load subject {id}"))?;
    for line in format_info(&subject) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn format_info(subject: &Subject) -> Vec<String> {
    let mut lines = vec![format!("ID:       {}", subject.id)];
    if !subject.name_cn.is_empty() {
        lines.push(format!("Name:     {}", subject.name_cn));
    }
    lines.push(format!("Original: {}", subject.name));
    if let Some(date) = subject.date.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("Date:     {date}"));
    }
    if !subject.summary.trim().is_empty() {
        lines.push(String::new());
        lines.extend(subject.summary.trim().lines().map(str::to_string));
    }
    lines
}

// ========== status ==========

pub fn status(backend: &CoreService, id: u32) -> Result<()> {
    let data = backend
        .load_subject(id)
        .with_context(|| format!("Failed to load subject {id}"))?;
    if let Some(e) = &data.episodes_error {
        log::warn!("Episodes of subject {id} unavailable: {e}");
    }

    // 已收藏时以章节记录标记看过；读取失败则按进度推算
    let watched = if data.collected {
        match backend.block_on(backend.collection().user_episodes(id, 0, USER_EPISODE_LIMIT)) {
            Ok(page) => Some(watched_ids(&page.data)),
            Err(e) => {
                log::warn!("Episode progress of subject {id} unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    let lines = format_status(
        &data.subject,
        &data.entry,
        data.collected,
        &data.episodes,
        watched.as_ref(),
    );
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn watched_ids(records: &[UserEpisode]) -> HashSet<u32> {
    records
        .iter()
        .filter(|r| r.status == EpisodeCollectionType::Done)
        .map(|r| r.episode.id)
        .collect()
}

pub(crate) fn format_status(
    subject: &Subject,
    entry: &Entry,
    collected: bool,
    episodes: &[Episode],
    watched: Option<&HashSet<u32>>,
) -> Vec<String> {
    let status = match entry.status {
        Some(status) if collected => status.label(),
        _ => "Not collected",
    };
    let kind = subject.kind().map_or("?", |k| k.name_cn());
    let rate = if entry.rate == 0 {
        "-".to_string()
    } else {
        format!("{}/10", entry.rate)
    };
    let tags = if entry.tags.is_empty() {
        "-".to_string()
    } else {
        entry.tags.join(" ")
    };

    let mut lines = vec![
        subject.display_name().to_string(),
        format!("Status:   {status}"),
        format!("Type:     {kind}"),
        format!("Tags:     {tags}"),
        format!("Rating:   {rate}"),
        format!(
            "Progress: {}/{}",
            entry.ep_status,
            episodes_label(subject.episode_count())
        ),
    ];

    let main: Vec<&Episode> = episodes.iter().filter(|e| e.is_main()).collect();
    if main.is_empty() {
        return lines;
    }
    lines.push(String::new());
    let progress = entry.ep_status as usize;
    let cells: Vec<String> = main
        .iter()
        .enumerate()
        .map(|(i, ep)| {
            let done = watched.map_or(i < progress, |ids| ids.contains(&ep.id));
            let mark = if done { '*' } else { ' ' };
            format!("{mark}{:>3}", episode_number(ep))
        })
        .collect();
    for row in cells.chunks(GRID_COLUMNS) {
        lines.push(row.join(" "));
    }
    lines.push("(* watched)".to_string());
    lines
}

/// 集数标签：优先 `ep`，否则 `sort`；整数不带小数点
fn episode_number(ep: &Episode) -> String {
    ep.ep.unwrap_or(ep.sort).to_string()
}

// ========== edit ==========

pub fn edit(backend: &CoreService, args: &EditArgs) -> Result<()> {
    let (entry, collected) = backend
        .load_entry(args.id)
        .with_context(|| format!("Failed to load subject {}", args.id))?;

    let mut session = EditSession::open(&entry);
    apply_edit(&mut session, args, collected);
    if session.diff().is_empty() {
        println!("Nothing to change for {}", entry.display_name());
        return Ok(());
    }

    match backend.commit(&session) {
        Ok(outcome) => {
            for line in format_outcome(&outcome) {
                println!("{line}");
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Commit of subject {} failed: {e}", args.id);
            Err(anyhow::Error::new(e)
                .context(format!("Failed to update {}", entry.display_name())))
        }
    }
}

/// 把命令行参数写进工作副本；尚未收藏时状态默认为在看
pub(crate) fn apply_edit(session: &mut EditSession, args: &EditArgs, collected: bool) {
    let status = args
        .status
        .or((!collected).then_some(CollectionStatus::Watching));
    if let Some(status) = status {
        session.set_status(Some(status));
    }
    if let Some(tags) = &args.tags {
        session.set_tags_from_input(tags);
    }
    if let Some(rate) = args.rate {
        session.set_rate(rate);
    }
    if let Some(comment) = &args.comment {
        session.set_comment(comment.as_str());
    }
    if let Some(private) = args.private {
        session.set_private(private);
    }
    if let Some(episode) = args.watch {
        session.set_progress(episode);
    } else if args.next {
        let next = session.working().ep_status.saturating_add(1);
        session.set_progress(next);
    }
}

pub(crate) fn format_outcome(outcome: &CommitOutcome) -> Vec<String> {
    let entry = &outcome.entry;
    let status = entry.status.map_or("-", CollectionStatus::label);
    let mut lines = vec![format!(
        "Updated {}: {status}, {}/{}",
        entry.display_name(),
        entry.ep_status,
        episodes_label(entry.episode_total())
    )];
    if let Some(sync) = outcome.progress {
        lines.push(format!(
            "Episodes marked watched: {}, unmarked: {}",
            sync.done, sync.reset
        ));
    }
    lines
}
