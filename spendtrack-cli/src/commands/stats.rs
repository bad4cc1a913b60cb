//! Stats command - spending analytics summaries

use anyhow::Result;
use chrono::Datelike;
use colored::Colorize;
use rust_decimal::Decimal;

use spendtrack_core::domain::DashboardStats;

use crate::output;

use super::{get_context, require_login};

pub async fn run(year: Option<i32>, month: Option<u32>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    require_login(&ctx)?;

    let stats = match (year, month) {
        (None, None) => ctx.api.get_general_stats().await,
        (year, month) => {
            let now = chrono::Utc::now();
            let year = year.unwrap_or_else(|| now.year());
            let month = month.unwrap_or_else(|| now.month());
            ctx.api.get_dashboard_stats(year, month).await
        }
    };

    let stats: DashboardStats = match stats.into_result() {
        Ok(stats) => stats,
        Err(msg) => anyhow::bail!("{}", msg),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Spending Summary".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Income".to_string(), format_total(stats.total_income)]);
    table.add_row(vec![
        "Expenses".to_string(),
        format_total(stats.total_expenses),
    ]);
    table.add_row(vec!["Balance".to_string(), format_total(stats.balance)]);
    if let Some(count) = stats.transaction_count {
        table.add_row(vec!["Transactions".to_string(), count.to_string()]);
    }
    println!("{}", table);

    // Category breakdown is best-effort; a failure here doesn't fail the command
    if let Some(categories) = ctx.api.get_category_stats().await.data() {
        if !categories.is_empty() {
            println!();
            println!("{}", "By Category".bold());
            let mut table = output::create_table();
            table.set_header(vec!["Category", "Total", "Share"]);
            for cat in categories {
                table.add_row(vec![
                    cat.category_name.unwrap_or_default(),
                    format_total(cat.total),
                    cat.percentage
                        .map(|p| format!("{:.1}%", p))
                        .unwrap_or_default(),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

fn format_total(value: Option<Decimal>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "-".to_string())
}
