//! 分页响应

use serde::{Deserialize, Serialize};

/// 分页列表响应（`/v0` 接口的通用外壳）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    /// 服务端记录总数
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Paged<T> {
    /// 构造一页数据
    #[must_use]
    pub fn new(data: Vec<T>, total: u32, offset: u32, limit: u32) -> Self {
        Self {
            total,
            limit,
            offset,
            data,
        }
    }

    /// 空页
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0, 0)
    }
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self::empty()
    }
}
