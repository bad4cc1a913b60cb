//! Analytics and dashboard aggregate models

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::coerce_decimal_opt;

/// Health probe body from `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub total_income: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub total_expenses: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub transaction_count: Option<i64>,
}

/// Income/expense totals for a single month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyStats {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub income: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub expenses: Option<Decimal>,
}

/// Per-category spending aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// One point on the spending trend chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingTrend {
    pub month: String,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub income: Option<Decimal>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub expenses: Option<Decimal>,
}

/// Name-to-amount maps from the totals endpoints
pub type TotalsByKey = HashMap<String, Decimal>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_stats_decode_mixed_number_shapes() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"total_income": "1200.50", "total_expenses": 430.25, "transaction_count": 17}"#,
        )
        .unwrap();
        assert_eq!(stats.total_income, Some(Decimal::new(120050, 2)));
        assert_eq!(stats.total_expenses, Some(Decimal::new(43025, 2)));
        assert!(stats.balance.is_none());
    }
}
