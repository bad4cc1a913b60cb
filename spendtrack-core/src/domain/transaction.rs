//! Transaction transport models
//!
//! These mirror the wire shapes of the `/transactions` endpoints. Amounts
//! arrive as JSON numbers from some deployments and as strings from others,
//! so deserialization coerces both into `Decimal`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A single transaction as returned by the server
///
/// Identity is `id`. Fields beyond the core set are optional so that shape
/// drift between deployments does not fail the decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(deserialize_with = "coerce_decimal")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a transaction
#[derive(Debug, Clone, Serialize)]
pub struct TransactionForm {
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_date: NaiveDate,
}

/// Partial update for a transaction; unset fields are left unchanged
/// by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<NaiveDate>,
}

/// List filters for `GET /transactions`
///
/// Unset fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    pub category_id: Option<i64>,
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TransactionFilters {
    /// Query pairs for the transactions endpoint, skipping unset values
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        if let Some(ty) = self.transaction_type {
            pairs.push(("type", ty.as_str().to_string()));
        }
        if let Some(date) = self.start_date {
            pairs.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            pairs.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Server response to a multipart transaction upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadOutcome {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub count: i64,
}

/// Accept a monetary amount as either a JSON number or a numeric string
pub(crate) fn coerce_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as DeError;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(Decimal),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(d) => Ok(d),
        NumberOrString::String(s) => s
            .trim()
            .parse::<Decimal>()
            .map_err(|e| DeError::custom(format!("Invalid amount '{}': {}", s, e))),
    }
}

/// Same coercion for optional amounts
pub(crate) fn coerce_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "coerce_decimal")] Decimal);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|w| w.0))
}
