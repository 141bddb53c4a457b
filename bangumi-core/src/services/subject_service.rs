//! 条目服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::{check_limit, ServiceContext};
use crate::types::{Episode, Paged, Subject};

/// 条目服务（与用户无关的公开数据）
pub struct SubjectService {
    ctx: Arc<ServiceContext>,
}

impl SubjectService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 条目详情
    pub async fn get(&self, subject_id: u32) -> CoreResult<Subject> {
        self.ctx
            .get_json(&format!("/v0/subjects/{subject_id}"))
            .await
    }

    /// 条目的章节列表
    pub async fn episodes(
        &self,
        subject_id: u32,
        offset: u32,
        limit: u32,
    ) -> CoreResult<Paged<Episode>> {
        check_limit(limit)?;
        self.ctx
            .get_json(&format!(
                "/v0/episodes?subject_id={subject_id}&offset={offset}&limit={limit}"
            ))
            .await
    }
}
