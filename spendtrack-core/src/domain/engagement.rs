//! Engagement resources: alerts, tips, badges, reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A notification raised by the server (budget overruns etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: i64,
    pub message: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A financial tip surfaced to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub read: bool,
}

/// An achievement badge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

/// A generated report summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Generic `{message}` acknowledgment body returned by delete and
/// mark-as-read endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Acknowledgment {
    #[serde(default)]
    pub message: String,
}
