//! 用户信息

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// `/v0/me` 返回的当前用户
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: u32,
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nickname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sign: String,
}

impl UserInfo {
    /// 昵称为空时退回用户名
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            &self.username
        } else {
            &self.nickname
        }
    }
}
