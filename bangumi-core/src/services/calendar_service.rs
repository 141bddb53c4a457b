//! 每日放送服务

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::CalendarDay;

/// 每日放送服务
pub struct CalendarService {
    ctx: Arc<ServiceContext>,
}

impl CalendarService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 获取一周放送表，每天的条目按关注人数降序
    pub async fn calendar(&self) -> CoreResult<Vec<CalendarDay>> {
        let mut days: Vec<CalendarDay> = self.ctx.get_json("/calendar").await?;
        for day in &mut days {
            day.sort_by_followers();
        }
        Ok(days)
    }
}
