//! `auth`：检查或删除保存的凭证
//!
//! 登录授权需要浏览器回调，不在命令行里做；凭证由外部写入钥匙串或 `credential.json`。

use anyhow::Result;

use crate::backend::CoreService;

pub fn status(backend: &CoreService) -> Result<()> {
    match backend.whoami() {
        Ok(user) => {
            println!("Credential OK, logged in as {} ({})", user.display_name(), user.username);
            Ok(())
        }
        Err(e) => {
            log::warn!("Credential check failed: {e:#}");
            println!("Credential check failed: {e:#}");
            println!("Credential file: {}", backend.credential_path().display());
            Err(e)
        }
    }
}

pub fn logout(backend: &CoreService) -> Result<()> {
    if backend.logout()? {
        println!("Logged out, stored credential removed");
    } else {
        println!("No stored credential found");
    }
    Ok(())
}
