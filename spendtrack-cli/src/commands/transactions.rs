//! Transaction commands - list, add, edit, remove, upload

use std::path::Path;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;

use spendtrack_core::domain::{TransactionFilters, TransactionForm, TransactionPatch};
use spendtrack_core::TransactionType;

use crate::output;

use super::{get_context, require_login};

#[derive(Subcommand)]
pub enum TxCommands {
    /// List transactions
    List {
        /// Page to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Filter by type (income or expense)
        #[arg(long, value_name = "TYPE")]
        r#type: Option<TransactionType>,
        /// Filter by category ID
        #[arg(long)]
        category: Option<i64>,
        /// Only transactions on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only transactions on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Page size
        #[arg(long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a transaction
    Add {
        /// Amount, e.g. 12.50
        amount: Decimal,
        /// income or expense
        #[arg(long, default_value = "expense")]
        r#type: TransactionType,
        /// Category ID
        #[arg(long)]
        category: Option<i64>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Transaction date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: i64,
        #[arg(long)]
        amount: Option<Decimal>,
        #[arg(long)]
        r#type: Option<TransactionType>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a transaction
    Rm {
        /// Transaction ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn run(command: TxCommands) -> Result<()> {
    match command {
        TxCommands::List {
            page,
            r#type,
            category,
            from,
            to,
            limit,
            json,
        } => {
            let filters = TransactionFilters {
                category_id: category,
                transaction_type: r#type,
                start_date: from,
                end_date: to,
                page: None,
                limit,
            };
            run_list(filters, page, json).await
        }
        TxCommands::Add {
            amount,
            r#type,
            category,
            description,
            date,
        } => run_add(amount, r#type, category, description, date).await,
        TxCommands::Edit {
            id,
            amount,
            r#type,
            category,
            description,
            date,
        } => run_edit(id, amount, r#type, category, description, date).await,
        TxCommands::Rm { id, yes } => run_rm(id, yes).await,
    }
}

async fn run_list(filters: TransactionFilters, page: u32, json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let mut store = ctx.transaction_store(filters);
    store.load(Some(page)).await;

    if let Some(msg) = store.error() {
        anyhow::bail!("{}", msg);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(store.transactions())?);
        return Ok(());
    }

    if store.transactions().is_empty() {
        output::info("No transactions found");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Date", "Type", "Amount", "Category", "Description"]);
    for tx in store.transactions() {
        table.add_row(vec![
            tx.id.to_string(),
            tx.transaction_date.to_string(),
            tx.transaction_type.to_string(),
            output::format_amount(tx.amount, tx.transaction_type),
            tx.category_name.clone().unwrap_or_default(),
            tx.description.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
    println!(
        "Page {} of {} ({} transactions)",
        store.current_page(),
        store.total_pages(),
        store.total()
    );

    Ok(())
}

async fn run_add(
    amount: Decimal,
    tx_type: TransactionType,
    category: Option<i64>,
    description: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let form = TransactionForm {
        amount,
        transaction_type: tx_type,
        category_id: category,
        description,
        transaction_date: date.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let mut store = ctx.transaction_store(TransactionFilters::default());
    match store.create(&form).await {
        Some(tx) => {
            output::success(&format!(
                "Created transaction #{} ({})",
                tx.id,
                output::format_amount(tx.amount, tx.transaction_type)
            ));
            Ok(())
        }
        None => anyhow::bail!("{}", store.error().unwrap_or("Create failed")),
    }
}

async fn run_edit(
    id: i64,
    amount: Option<Decimal>,
    tx_type: Option<TransactionType>,
    category: Option<i64>,
    description: Option<String>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let patch = TransactionPatch {
        amount,
        transaction_type: tx_type,
        category_id: category,
        description,
        transaction_date: date,
    };

    let mut store = ctx.transaction_store(TransactionFilters::default());
    match store.update(id, &patch).await {
        Some(tx) => {
            output::success(&format!("Updated transaction #{}", tx.id));
            Ok(())
        }
        None => anyhow::bail!("{}", store.error().unwrap_or("Update failed")),
    }
}

async fn run_rm(id: i64, yes: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete transaction #{}?", id))
            .default(false)
            .interact()?;
        if !confirmed {
            output::info("Aborted");
            return Ok(());
        }
    }

    let mut store = ctx.transaction_store(TransactionFilters::default());
    if store.delete(id).await {
        output::success(&format!("Deleted transaction #{}", id));
        Ok(())
    } else {
        anyhow::bail!("{}", store.error().unwrap_or("Delete failed"))
    }
}

pub async fn run_upload(file: &Path) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let bytes = tokio::fs::read(file).await?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.csv")
        .to_string();

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Uploading {}", file_name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let mut store = ctx.transaction_store(TransactionFilters::default());
    let outcome = store.upload(&file_name, bytes).await;

    spinner.finish_and_clear();

    match outcome {
        Some(outcome) => {
            output::success(&format!(
                "Imported {} transactions ({} now on server)",
                outcome.count,
                store.total()
            ));
            Ok(())
        }
        None => anyhow::bail!("{}", store.error().unwrap_or("Upload failed")),
    }
}
