//! `search`：按关键字与过滤条件搜索条目，打印第一页

use anyhow::{bail, Context, Result};
use bangumi_core::types::{Paged, SearchFilter, SearchPayload, Subject, SubjectType};

use crate::backend::CoreService;
use crate::cli::SearchArgs;

pub fn run(backend: &CoreService, args: &SearchArgs) -> Result<()> {
    let payload = build_payload(args);
    if payload.keyword.is_empty() && payload.filter == SearchFilter::default() {
        bail!("Nothing to search, give a keyword or a filter (see `search --help`)");
    }

    let page = backend.search(&payload, 0).context("Search failed")?;
    for line in format_results(&page) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn build_payload(args: &SearchArgs) -> SearchPayload {
    SearchPayload {
        keyword: args.keyword.as_deref().unwrap_or_default().trim().to_string(),
        sort: args.sort,
        filter: SearchFilter {
            subject_type: args.types.clone(),
            meta_tags: args.meta_tags.clone(),
            tag: args.tags.clone(),
            air_date: args.air_dates.clone(),
            rating: args.ratings.clone(),
            rank: args.ranks.clone(),
            nsfw: args.nsfw.then_some(true),
        },
    }
}

/// 总数一行，随后每条 `编号  名称 | 类型 | 评分 (人数) | #排名`
pub(crate) fn format_results(page: &Paged<Subject>) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.data.len() + 1);
    lines.push(format!(
        "Total results: {}. Showing: {}",
        page.total,
        page.data.len()
    ));
    for subject in &page.data {
        let kind = subject.kind().map_or("?", SubjectType::name_cn);
        let rank = if subject.rating.rank == 0 {
            "-".to_string()
        } else {
            format!("#{}", subject.rating.rank)
        };
        lines.push(format!(
            "{:>7}  {} | {kind} | {:.1} ({}) | {rank}",
            subject.id,
            subject.display_name(),
            subject.rating.score,
            subject.rating.total
        ));
    }
    lines
}
