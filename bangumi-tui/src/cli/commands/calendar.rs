//! `calendar`：按星期打印放送表，每天按关注人数降序

use anyhow::{Context, Result};
use bangumi_core::types::CalendarDay;
use chrono::Datelike;

use crate::backend::CoreService;

const DIVIDER_WIDTH: usize = 40;

pub fn run(backend: &CoreService) -> Result<()> {
    let mut days = backend
        .load_calendar()
        .context("Failed to load the calendar")?;
    for day in &mut days {
        day.sort_by_followers();
    }

    let today = chrono::Local::now().weekday().number_from_monday();
    for line in format_days(&days, today) {
        println!("{line}");
    }
    Ok(())
}

/// 每天一个标题行（今天带 `*`）和分隔线，随后每条 `关注人数  名称`
pub(crate) fn format_days(days: &[CalendarDay], today: u32) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, day) in days.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let marker = if day.weekday.id == today { " *" } else { "" };
        lines.push(format!("{} {}{marker}", day.weekday.en, day.weekday.cn));
        lines.push("-".repeat(DIVIDER_WIDTH));
        if day.items.is_empty() {
            lines.push("(nothing airing)".to_string());
        }
        for item in &day.items {
            lines.push(format!("{:>6}  {}", item.followers(), item.display_name()));
        }
    }
    lines
}
