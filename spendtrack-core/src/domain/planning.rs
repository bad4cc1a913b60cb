//! Planning resources: categories, budgets, goals, linked accounts,
//! emergency funds, insurance
//!
//! All of these are loose transport structs. The server owns validation;
//! the client decodes tolerantly and passes values through.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{coerce_decimal, coerce_decimal_opt};

/// A spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub category_type: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Create/update payload for a category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub category_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A monthly or periodic budget for a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(deserialize_with = "coerce_decimal")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub spent: Option<Decimal>,
    #[serde(default)]
    pub period: Option<String>,
}

/// Create/update payload for a budget
#[derive(Debug, Clone, Default, Serialize)]
pub struct BudgetForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "coerce_decimal")]
    pub target_amount: Decimal,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub current_amount: Option<Decimal>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Create/update payload for a goal
#[derive(Debug, Clone, Default, Serialize)]
pub struct GoalForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

/// An external account linked for balance display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub balance: Option<Decimal>,
}

/// Create/update payload for a linked account
#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkedAccountForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

/// An emergency fund tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyFund {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "coerce_decimal")]
    pub target_amount: Decimal,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub current_amount: Option<Decimal>,
}

/// Create/update payload for an emergency fund
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmergencyFundForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_amount: Option<Decimal>,
}

/// An insurance policy record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insurance {
    pub id: i64,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub policy_type: Option<String>,
    #[serde(default, deserialize_with = "coerce_decimal_opt")]
    pub premium: Option<Decimal>,
    #[serde(default)]
    pub renewal_date: Option<NaiveDate>,
}

/// Create/update payload for an insurance policy
#[derive(Debug, Clone, Default, Serialize)]
pub struct InsuranceForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_amounts_coerce_from_strings() {
        let budget: Budget = serde_json::from_str(
            r#"{"id": 3, "amount": "250.00", "spent": "12.50", "period": "monthly"}"#,
        )
        .unwrap();
        assert_eq!(budget.amount, Decimal::new(25000, 2));
        assert_eq!(budget.spent, Some(Decimal::new(1250, 2)));
    }

    #[test]
    fn test_goal_tolerates_missing_progress() {
        let goal: Goal =
            serde_json::from_str(r#"{"id": 1, "name": "Trip", "target_amount": 1000}"#).unwrap();
        assert!(goal.current_amount.is_none());
        assert!(goal.deadline.is_none());
    }
}
