//! 章节（episode）相关类型定义

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// 章节
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Episode {
    pub id: u32,
    /// 0 为本篇，其余为 SP / OP / ED 等
    #[serde(rename = "type", default)]
    pub ep_type: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name_cn: String,
    #[serde(default)]
    pub sort: f64,
    #[serde(default)]
    pub ep: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub airdate: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default)]
    pub subject_id: u32,
}

impl Episode {
    /// 是否为本篇
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.ep_type == 0
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

    /// 放送日期，格式 `YYYY-MM-DD`，无法解析时为 `None`
    #[must_use]
    pub fn air_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.airdate, "%Y-%m-%d").ok()
    }
}

/// 用户的章节收藏状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum EpisodeCollectionType {
    /// 未收藏（PATCH 时表示撤销）
    None,
    Wish,
    Done,
    Dropped,
}

impl From<EpisodeCollectionType> for u8 {
    fn from(t: EpisodeCollectionType) -> Self {
        match t {
            EpisodeCollectionType::None => 0,
            EpisodeCollectionType::Wish => 1,
            EpisodeCollectionType::Done => 2,
            EpisodeCollectionType::Dropped => 3,
        }
    }
}

impl From<u8> for EpisodeCollectionType {
    fn from(code: u8) -> Self {
        match code {
            1 => Self::Wish,
            2 => Self::Done,
            3 => Self::Dropped,
            _ => Self::None,
        }
    }
}

/// 用户章节收藏记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEpisode {
    pub episode: Episode,
    #[serde(rename = "type")]
    pub status: EpisodeCollectionType,
}

/// 批量更新章节状态的请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodesPatch {
    pub episode_id: Vec<u32>,
    #[serde(rename = "type")]
    pub status: EpisodeCollectionType,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_air_date() {
        let ep = Episode {
            airdate: "2024-01-07".into(),
            ..Episode::default()
        };
        assert_eq!(ep.air_date(), NaiveDate::from_ymd_opt(2024, 1, 7));

        let ep = Episode::default();
        assert!(ep.air_date().is_none());
    }

    #[test]
    fn test_patch_body_shape() {
        let patch = EpisodesPatch {
            episode_id: vec![1, 2],
            status: EpisodeCollectionType::Done,
        };
        let v = serde_json::to_value(&patch).unwrap();
        assert_eq!(v["type"], 2);
        assert_eq!(v["episode_id"][1], 2);
    }
}
