//! Status command - backend connection and authentication state

use anyhow::Result;
use colored::Colorize;

use spendtrack_core::ConnectionState;

use crate::output;

use super::get_context;

pub async fn run(json: bool, watch: bool) -> Result<()> {
    let ctx = get_context()?;
    let monitor = ctx.connection_monitor();

    // Wait for the first tick to settle
    let mut rx = monitor.subscribe();
    while rx.borrow().is_loading {
        rx.changed().await?;
    }

    print_state(&monitor.state(), json)?;

    if watch {
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    changed?;
                    let state = *rx.borrow();
                    print_state(&state, json)?;
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    Ok(())
}

fn print_state(state: &ConnectionState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    println!("{}", "Spendtrack Backend".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Connected".to_string(), output::flag(state.is_connected)]);
    table.add_row(vec![
        "Authenticated".to_string(),
        output::flag(state.is_authenticated),
    ]);
    println!("{}", table);

    if state.is_connected && !state.is_authenticated {
        output::warning("Backend reachable but no valid login; run 'spt login'");
    }
    if !state.is_connected {
        output::warning("Backend unreachable; is the API server running?");
    }

    Ok(())
}
