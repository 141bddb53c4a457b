//! `list`：打印一页收藏

use anyhow::{Context, Result};
use bangumi_core::types::{CollectionStatus, Entry, Paged, SubjectType};

use super::episodes_label;
use crate::backend::CoreService;

pub fn run(
    backend: &CoreService,
    status: CollectionStatus,
    subject_type: Option<SubjectType>,
    limit: u32,
) -> Result<()> {
    let user = backend.whoami()?;
    let page = backend
        .block_on(
            backend
                .collection()
                .list(&user.username, status, subject_type, 0, limit),
        )
        .with_context(|| format!("Failed to load the {} list", status.label()))?;

    for line in format_page(&page) {
        println!("{line}");
    }
    Ok(())
}

/// 总数一行，随后每条 `序号. 进度/集数 名称`
pub(crate) fn format_page(page: &Paged<Entry>) -> Vec<String> {
    let mut lines = Vec::with_capacity(page.data.len() + 1);
    lines.push(format!(
        "Total: {}. Showing: {}",
        page.total,
        page.data.len()
    ));
    for (i, entry) in page.data.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {}/{} {}",
            i + 1,
            entry.ep_status,
            episodes_label(entry.episode_total()),
            entry.display_name()
        ));
    }
    lines
}
