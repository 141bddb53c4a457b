//! 收藏记录（Entry）相关类型定义

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::null_as_default;
use super::subject::{SlimSubject, Subject};

/// 收藏状态（bucket）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollectionStatus {
    Wish,
    Done,
    Watching,
    OnHold,
    Dropped,
}

impl CollectionStatus {
    /// 页面展示顺序
    pub const ALL: [CollectionStatus; 5] = [
        CollectionStatus::Watching,
        CollectionStatus::Wish,
        CollectionStatus::Done,
        CollectionStatus::OnHold,
        CollectionStatus::Dropped,
    ];

    /// 接口编号
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Wish => 1,
            Self::Done => 2,
            Self::Watching => 3,
            Self::OnHold => 4,
            Self::Dropped => 5,
        }
    }

    /// 从接口编号解析；`0` 或未知编号表示未设置
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Wish),
            2 => Some(Self::Done),
            3 => Some(Self::Watching),
            4 => Some(Self::OnHold),
            5 => Some(Self::Dropped),
            _ => None,
        }
    }

    /// 对应的页面名
    #[must_use]
    pub fn page_name(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Wish => "wish",
            Self::Done => "done",
            Self::OnHold => "stashed",
            Self::Dropped => "dropped",
        }
    }

    /// 页面名反查
    #[must_use]
    pub fn from_page_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.page_name() == name)
    }

    /// 显示标签
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Watching => "Watching",
            Self::Wish => "Wish",
            Self::Done => "Done",
            Self::OnHold => "On Hold",
            Self::Dropped => "Dropped",
        }
    }

    /// 编辑表单中的下一个选项，在五个状态间循环
    ///
    /// 未设置只作为尚未收藏条目的起点，不会被循环到。
    #[must_use]
    pub fn cycle_next(current: Option<Self>) -> Self {
        let len = Self::ALL.len();
        match current.and_then(|s| Self::ALL.iter().position(|x| *x == s)) {
            None => Self::ALL[0],
            Some(idx) => Self::ALL[(idx + 1) % len],
        }
    }

    /// 编辑表单中的上一个选项
    #[must_use]
    pub fn cycle_prev(current: Option<Self>) -> Self {
        let len = Self::ALL.len();
        match current.and_then(|s| Self::ALL.iter().position(|x| *x == s)) {
            None => Self::ALL[len - 1],
            Some(idx) => Self::ALL[(idx + len - 1) % len],
        }
    }
}

impl fmt::Display for CollectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<CollectionStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let code = Option::<u8>::deserialize(deserializer)?.unwrap_or(0);
    Ok(CollectionStatus::from_code(code))
}

#[allow(clippy::ref_option)]
fn serialize_status<S>(status: &Option<CollectionStatus>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u8(status.map_or(0, CollectionStatus::code))
}

/// 用户对一个条目的收藏记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    pub subject_id: u32,
    #[serde(default)]
    pub subject_type: u8,
    /// 收藏状态，`None` 表示尚未收藏
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_status",
        serialize_with = "serialize_status"
    )]
    pub status: Option<CollectionStatus>,
    /// 我的标签（有序）
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
    /// 评分 0–10，0 为未评分
    #[serde(default)]
    pub rate: u8,
    #[serde(default)]
    pub ep_status: u32,
    #[serde(default)]
    pub vol_status: u32,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: SlimSubject,
}

impl Entry {
    /// 为尚未收藏的条目合成一条默认记录
    #[must_use]
    pub fn placeholder(subject: &Subject) -> Self {
        Self {
            subject_id: subject.id,
            subject_type: subject.subject_type,
            subject: SlimSubject::from(subject),
            ..Self::default()
        }
    }

    /// 优先显示中文名
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.subject.name_cn.is_empty() {
            &self.subject.name
        } else {
            &self.subject.name_cn
        }
    }

    /// 已知集数（书籍为卷数）
    #[must_use]
    pub fn episode_total(&self) -> u32 {
        self.subject.eps
    }

    /// 收藏信息（状态、标签、评论、评分、隐私）是否与另一份不同
    #[must_use]
    pub fn info_differs(&self, other: &Entry) -> bool {
        self.status != other.status
            || self.tags != other.tags
            || self.comment != other.comment
            || self.rate != other.rate
            || self.private != other.private
    }
}

/// 整体更新收藏的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionUpdate {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub status: Option<u8>,
    pub rate: u8,
    pub comment: String,
    pub private: bool,
    pub tags: Vec<String>,
}

impl From<&Entry> for CollectionUpdate {
    fn from(entry: &Entry) -> Self {
        Self {
            status: entry.status.map(CollectionStatus::code),
            rate: entry.rate,
            comment: entry.comment.clone(),
            private: entry.private,
            tags: entry.tags.clone(),
        }
    }
}
