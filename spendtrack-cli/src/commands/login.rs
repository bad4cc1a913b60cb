//! Login/logout commands - token storage and verification

use anyhow::Result;

use crate::output;

use super::get_context;

pub async fn run_login(token: &str, remember: bool) -> Result<()> {
    let ctx = get_context()?;

    ctx.auth.login(token, None, remember)?;

    // Verify the token immediately; an invalid one is cleared again by the
    // unauthorized handling in the client
    match ctx.api.get_current_user().await.into_result() {
        Ok(user) => {
            output::success(&format!("Logged in as {}", user.username));
            if remember {
                output::info("Token stored durably; run 'spt logout' to clear it");
            } else {
                output::info("Token stored for this session only");
            }
            Ok(())
        }
        Err(msg) => {
            anyhow::bail!("Token could not be verified: {}", msg)
        }
    }
}

pub fn run_logout() -> Result<()> {
    let ctx = get_context()?;
    ctx.auth.logout()?;
    output::success("Logged out");
    Ok(())
}
