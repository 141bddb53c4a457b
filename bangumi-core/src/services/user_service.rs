//! 用户服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::UserInfo;

/// 用户服务
pub struct UserService {
    ctx: Arc<ServiceContext>,
}

impl UserService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 当前登录用户
    pub async fn me(&self) -> CoreResult<UserInfo> {
        self.ctx.get_json("/v0/me").await
    }
}
