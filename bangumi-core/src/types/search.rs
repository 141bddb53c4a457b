//! 条目搜索请求

use serde::{Deserialize, Serialize};

use super::subject::SubjectType;

/// 排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    #[default]
    Match,
    Heat,
    Rank,
    Score,
}

/// 搜索过滤条件。除 `subject_type` 为“或”关系外，其余列表均为“且”关系；
/// 以 `-` 开头的标签表示排除
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    pub subject_type: Vec<SubjectType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag: Vec<String>,
    /// 例如 `[">=2020-07-01", "<2020-10-01"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub air_date: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rating: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rank: Vec<String>,
    /// `None` 表示不限
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
}

/// 搜索请求体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub keyword: String,
    pub sort: SearchSort,
    pub filter: SearchFilter,
}

impl SearchPayload {
    /// 由关键字和空格分隔的标签串构造
    #[must_use]
    pub fn from_input(keyword: &str, tags: &str) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            sort: SearchSort::Match,
            filter: SearchFilter {
                tag: tags.split_whitespace().map(str::to_string).collect(),
                ..SearchFilter::default()
            },
        }
    }

    /// 关键字与标签均为空
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyword.is_empty() && self.filter.tag.is_empty()
    }
}
