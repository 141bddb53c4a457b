//! 条目（subject）相关类型定义

use std::fmt;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SubjectType {
    Book,
    Anime,
    Music,
    Game,
    Real,
}

impl SubjectType {
    /// 全部类型，按接口编号排序
    pub const ALL: [SubjectType; 5] = [
        SubjectType::Book,
        SubjectType::Anime,
        SubjectType::Music,
        SubjectType::Game,
        SubjectType::Real,
    ];

    /// 接口编号
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Book => 1,
            Self::Anime => 2,
            Self::Music => 3,
            Self::Game => 4,
            Self::Real => 6,
        }
    }

    /// 从接口编号解析，未知编号返回 `None`
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// 英文名反查，忽略大小写
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name.trim()))
    }

    /// 英文名
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Anime => "anime",
            Self::Music => "music",
            Self::Game => "game",
            Self::Real => "real",
        }
    }

    /// 中文名
    #[must_use]
    pub fn name_cn(self) -> &'static str {
        match self {
            Self::Book => "书籍",
            Self::Anime => "动画",
            Self::Music => "音乐",
            Self::Game => "游戏",
            Self::Real => "三次元",
        }
    }
}

impl From<SubjectType> for u8 {
    fn from(t: SubjectType) -> Self {
        t.code()
    }
}

impl TryFrom<u8> for SubjectType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown subject type: {code}"))
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 标签及其计数
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

/// 评分信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rating {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub score: f64,
}

/// 各收藏状态人数
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectStats {
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

/// 收藏记录中内嵌的精简条目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlimSubject {
    pub id: u32,
    #[serde(rename = "type", default)]
    pub subject_type: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub volumes: u32,
    #[serde(default)]
    pub collection_total: u32,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub date: Option<String>,
}

/// 完整条目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    pub id: u32,
    #[serde(rename = "type", default)]
    pub subject_type: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_cn: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub eps: u32,
    #[serde(default)]
    pub total_episodes: u32,
    #[serde(default)]
    pub volumes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: Rating,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collection: SubjectStats,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform: String,
}

impl Subject {
    /// 优先显示中文名
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name
        } else {
            &self.name_cn
        }
    }

    /// 条目类型（未知编号为 `None`）
    #[must_use]
    pub fn kind(&self) -> Option<SubjectType> {
        SubjectType::from_code(self.subject_type)
    }

    /// 收藏总人数
    #[must_use]
    pub fn collection_total(&self) -> u32 {
        let c = &self.collection;
        c.wish + c.collect + c.doing + c.on_hold + c.dropped
    }

    /// 已知的集数：优先 `eps`，否则 `total_episodes`
    #[must_use]
    pub fn episode_count(&self) -> u32 {
        if self.eps > 0 {
            self.eps
        } else {
            self.total_episodes
        }
    }
}

impl From<&Subject> for SlimSubject {
    fn from(s: &Subject) -> Self {
        let short_summary: String = s.summary.chars().take(120).collect();
        Self {
            id: s.id,
            subject_type: s.subject_type,
            name: s.name.clone(),
            name_cn: s.name_cn.clone(),
            short_summary,
            tags: s.tags.iter().take(10).cloned().collect(),
            score: s.rating.score,
            eps: s.episode_count(),
            volumes: s.volumes,
            collection_total: s.collection_total(),
            rank: s.rating.rank,
            date: s.date.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_type_codes() {
        assert_eq!(SubjectType::from_code(6), Some(SubjectType::Real));
        assert_eq!(SubjectType::from_code(5), None);
        assert_eq!(serde_json::to_string(&SubjectType::Anime).unwrap(), "2");
    }

    #[test]
    fn test_subject_type_from_name() {
        assert_eq!(SubjectType::from_name("anime"), Some(SubjectType::Anime));
        assert_eq!(SubjectType::from_name(" Real "), Some(SubjectType::Real));
        assert_eq!(SubjectType::from_name("movie"), None);
    }

    #[test]
    fn test_subject_tolerates_nulls() {
        let json = r#"{"id": 7, "type": 2, "name": "x", "name_cn": null, "summary": null,
            "tags": null, "rating": {"rank": 3, "total": 10, "score": 7.5}}"#;
        let s: Subject = serde_json::from_str(json).unwrap();
        assert_eq!(s.display_name(), "x");
        assert!(s.tags.is_empty());
        assert_eq!(s.rating.rank, 3);
        assert_eq!(s.kind(), Some(SubjectType::Anime));
    }

    #[test]
    fn test_slim_from_subject() {
        let s = Subject {
            id: 1,
            eps: 0,
            total_episodes: 12,
            summary: "a".repeat(300),
            ..Subject::default()
        };
        let slim = SlimSubject::from(&s);
        assert_eq!(slim.eps, 12);
        assert_eq!(slim.short_summary.chars().count(), 120);
    }
}
