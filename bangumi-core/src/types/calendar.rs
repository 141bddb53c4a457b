//! 每日放送

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// 星期信息，`id` 1–7 对应周一至周日
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weekday {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub cn: String,
    #[serde(default)]
    pub ja: String,
    #[serde(default)]
    pub id: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarRating {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarCollection {
    #[serde(default)]
    pub wish: u32,
    #[serde(default)]
    pub collect: u32,
    #[serde(default)]
    pub doing: u32,
    #[serde(default)]
    pub on_hold: u32,
    #[serde(default)]
    pub dropped: u32,
}

/// 放送表中的一个条目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub air_date: String,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub rating: Option<CalendarRating>,
    #[serde(default)]
    pub collection: Option<CalendarCollection>,
}

impl CalendarItem {
    /// 关注人数：想看 + 在看 + 看过
    #[must_use]
    pub fn followers(&self) -> u32 {
        self.collection
            .as_ref()
            .map_or(0, |c| c.wish + c.doing + c.collect)
    }

    /// 优先显示中文名
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name
        } else {
            &self.name_cn
        }
    }
}

/// 一天的放送列表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarDay {
    pub weekday: Weekday,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CalendarItem>,
}

impl CalendarDay {
    /// 按关注人数降序排序（稳定排序）
    pub fn sort_by_followers(&mut self) {
        self.items
            .sort_by_key(|item| std::cmp::Reverse(item.followers()));
    }
}
