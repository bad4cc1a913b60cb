//! CLI command implementations

pub mod login;
pub mod stats;
pub mod status;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{Context, Result};
use spendtrack_core::SpendtrackContext;

/// Get the spendtrack directory from environment or default
pub fn get_app_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SPENDTRACK_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".spendtrack")
    }
}

/// Get or create the spendtrack context
pub fn get_context() -> Result<SpendtrackContext> {
    let app_dir = get_app_dir();

    std::fs::create_dir_all(&app_dir)
        .with_context(|| format!("Failed to create spendtrack directory: {:?}", app_dir))?;

    SpendtrackContext::new(&app_dir)
        .with_context(|| "Failed to initialize the Spendtrack client".to_string())
}

/// Bail with a hint when no token is stored
pub fn require_login(ctx: &SpendtrackContext) -> Result<()> {
    if !ctx.auth.is_logged_in() {
        anyhow::bail!("Not logged in. Run 'spt login --token <token>' first");
    }
    Ok(())
}
