//! 搜索服务

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{check_limit, decode, ServiceContext};
use crate::types::{Paged, SearchPayload, Subject};

/// 条目搜索服务
pub struct SearchService {
    ctx: Arc<ServiceContext>,
}

impl SearchService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 搜索条目
    pub async fn search(
        &self,
        payload: &SearchPayload,
        offset: u32,
        limit: u32,
    ) -> CoreResult<Paged<Subject>> {
        check_limit(limit)?;
        if payload.is_empty() {
            return Err(CoreError::ValidationError(
                "keyword or tags required".to_string(),
            ));
        }
        let path = format!("/v0/search/subjects?limit={limit}&offset={offset}");
        let bytes = self.ctx.post_json(&path, payload).await?;
        decode(&bytes, &path)
    }
}
