//! Spendtrack CLI - personal finance in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{login, stats, status, transactions};

/// Spendtrack - personal finance in your terminal
#[derive(Parser)]
#[command(name = "spt", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store an API token obtained from the Spendtrack backend
    Login {
        /// Bearer token to store
        #[arg(long)]
        token: String,
        /// Keep the token across sessions
        #[arg(long)]
        remember: bool,
    },

    /// Clear stored credentials
    Logout,

    /// Show backend connection and authentication state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Keep watching and print every change
        #[arg(long)]
        watch: bool,
    },

    /// Work with transactions
    Tx {
        #[command(subcommand)]
        command: transactions::TxCommands,
    },

    /// Show spending analytics
    Stats {
        /// Year to report on (with --month)
        #[arg(long)]
        year: Option<i32>,
        /// Month to report on (1-12)
        #[arg(long)]
        month: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a CSV/Excel file of transactions
    Upload {
        /// Path to the file
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { token, remember } => login::run_login(&token, remember).await,
        Commands::Logout => login::run_logout(),
        Commands::Status { json, watch } => status::run(json, watch).await,
        Commands::Tx { command } => transactions::run(command).await,
        Commands::Stats { year, month, json } => stats::run(year, month, json).await,
        Commands::Upload { file } => transactions::run_upload(&file).await,
    }
}
