//! Spendtrack REST API client
//!
//! One thin wrapper (`request`) carries every call: it attaches the bearer
//! token from the auth store, normalizes success and failure into
//! [`ApiResult`], unwraps `data` envelopes, and reacts to unauthorized
//! responses by forcing a client-side logout. Errors never cross this
//! boundary as panics or `Err`; callers always receive a tagged result.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Method, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use url::Url;

use crate::domain::{
    Acknowledgment, Alert, ApiResult, Badge, Budget, BudgetForm, Category, CategoryForm,
    CategoryStats, DashboardStats, EmergencyFund, EmergencyFundForm, Error, Goal, GoalForm,
    HealthStatus, Insurance, InsuranceForm, LinkedAccount, LinkedAccountForm, MonthlyStats,
    Paginated, ProfileUpdate, Report, Result, SpendingTrend, Tip, TotalsByKey, Transaction,
    TransactionFilters, TransactionForm, TransactionPatch, UploadOutcome, User, UserPreferences,
};
use crate::ports::FinanceApi;
use crate::services::AuthStateStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST client for the Spendtrack backend
pub struct RestClient {
    client: Client,
    base_url: String,
    auth: Arc<AuthStateStore>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Create a client against a base URL such as `http://localhost:3001/api`
    pub fn new(base_url: &str, auth: Arc<AuthStateStore>) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| Error::config(format!("Invalid API base URL: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(Error::config(format!(
                "API base URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        })
    }

    // =========================================================================
    // Request wrapper
    // =========================================================================

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<JsonValue>,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = self.auth.token() {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &body {
            req = req.json(body);
        }

        match req.send().await {
            Ok(response) => self.decode_response(response).await,
            Err(e) => ApiResult::Error(transport_message(e)),
        }
    }

    async fn decode_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();

        if !status.is_success() {
            // Best-effort body parse; a body that isn't JSON is treated as
            // an empty object, not a failure of its own
            let body: JsonValue = response
                .json()
                .await
                .unwrap_or_else(|_| JsonValue::Object(Default::default()));

            if status == StatusCode::UNAUTHORIZED {
                self.auth.force_logout();
            }

            return ApiResult::Error(error_message(status, &body));
        }

        let raw: JsonValue = match response.json().await {
            Ok(value) => value,
            Err(e) => return ApiResult::Error(transport_message(e)),
        };

        match serde_json::from_value::<T>(unwrap_envelope(raw)) {
            Ok(payload) => ApiResult::Data(payload),
            Err(e) => ApiResult::Error(format!("Unexpected response shape: {}", e)),
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> ApiResult<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.request(Method::POST, path, Some(value)).await,
            Err(e) => ApiResult::Error(e.to_string()),
        }
    }

    async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> ApiResult<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.request(Method::PUT, path, Some(value)).await,
            Err(e) => ApiResult::Error(e.to_string()),
        }
    }

    async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::PUT, path, None).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, None).await
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Probe `GET /health`
    ///
    /// Deliberately bypasses the wrapper: no bearer token is attached, so an
    /// unauthorized health endpoint can never force a logout.
    pub async fn health_check(&self) -> ApiResult<HealthStatus> {
        let url = format!("{}/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    return ApiResult::Error(format!("HTTP {}", status.as_u16()));
                }
                match response.json::<HealthStatus>().await {
                    Ok(health) => ApiResult::Data(health),
                    Err(e) => ApiResult::Error(transport_message(e)),
                }
            }
            Err(e) => ApiResult::Error(transport_message(e)),
        }
    }

    // =========================================================================
    // User
    // =========================================================================

    pub async fn get_current_user(&self) -> ApiResult<User> {
        self.get("/auth/me").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<User> {
        self.put("/auth/profile", update).await
    }

    pub async fn update_preferences(
        &self,
        preferences: &UserPreferences,
    ) -> ApiResult<UserPreferences> {
        self.put("/auth/preferences", preferences).await
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub async fn get_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ApiResult<Paginated<Transaction>> {
        let pairs = filters.to_query_pairs();
        let path = if pairs.is_empty() {
            "/transactions".to_string()
        } else {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish();
            format!("/transactions?{}", query)
        };
        self.get(&path).await
    }

    pub async fn get_transaction(&self, id: i64) -> ApiResult<Transaction> {
        self.get(&format!("/transactions/{}", id)).await
    }

    pub async fn create_transaction(&self, form: &TransactionForm) -> ApiResult<Transaction> {
        self.post("/transactions", form).await
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> ApiResult<Transaction> {
        self.put(&format!("/transactions/{}", id), patch).await
    }

    pub async fn delete_transaction(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/transactions/{}", id)).await
    }

    /// Upload a CSV/Excel file of transactions
    ///
    /// Multipart submission: the bearer token is sent but the JSON
    /// content-type default is not, so the multipart boundary header
    /// survives intact. Field name is `file`.
    pub async fn upload_transactions(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadOutcome> {
        let url = format!("{}/transactions/upload", self.base_url);
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let mut req = self.client.post(&url).multipart(form);
        if let Some(token) = self.auth.token() {
            req = req.bearer_auth(token);
        }

        match req.send().await {
            Ok(response) => self.decode_response(response).await,
            Err(e) => ApiResult::Error(transport_message(e)),
        }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.get("/categories").await
    }

    pub async fn get_category(&self, id: i64) -> ApiResult<Category> {
        self.get(&format!("/categories/{}", id)).await
    }

    pub async fn create_category(&self, form: &CategoryForm) -> ApiResult<Category> {
        self.post("/categories", form).await
    }

    pub async fn update_category(&self, id: i64, form: &CategoryForm) -> ApiResult<Category> {
        self.put(&format!("/categories/{}", id), form).await
    }

    pub async fn delete_category(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/categories/{}", id)).await
    }

    // =========================================================================
    // Budgets
    // =========================================================================

    pub async fn get_budgets(&self) -> ApiResult<Vec<Budget>> {
        self.get("/budgets").await
    }

    pub async fn get_budget(&self, id: i64) -> ApiResult<Budget> {
        self.get(&format!("/budgets/{}", id)).await
    }

    pub async fn create_budget(&self, form: &BudgetForm) -> ApiResult<Budget> {
        self.post("/budgets", form).await
    }

    pub async fn update_budget(&self, id: i64, form: &BudgetForm) -> ApiResult<Budget> {
        self.put(&format!("/budgets/{}", id), form).await
    }

    pub async fn delete_budget(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/budgets/{}", id)).await
    }

    // =========================================================================
    // Goals
    // =========================================================================

    pub async fn get_goals(&self) -> ApiResult<Vec<Goal>> {
        self.get("/goals").await
    }

    pub async fn get_goal(&self, id: i64) -> ApiResult<Goal> {
        self.get(&format!("/goals/{}", id)).await
    }

    pub async fn create_goal(&self, form: &GoalForm) -> ApiResult<Goal> {
        self.post("/goals", form).await
    }

    pub async fn update_goal(&self, id: i64, form: &GoalForm) -> ApiResult<Goal> {
        self.put(&format!("/goals/{}", id), form).await
    }

    pub async fn delete_goal(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/goals/{}", id)).await
    }

    pub async fn update_goal_progress(&self, id: i64, amount: Decimal) -> ApiResult<Goal> {
        self.post(
            &format!("/goals/{}/update-progress", id),
            &json!({ "amount": amount }),
        )
        .await
    }

    // =========================================================================
    // Linked accounts
    // =========================================================================

    pub async fn get_linked_accounts(&self) -> ApiResult<Vec<LinkedAccount>> {
        self.get("/linked-accounts").await
    }

    pub async fn get_linked_account(&self, id: i64) -> ApiResult<LinkedAccount> {
        self.get(&format!("/linked-accounts/{}", id)).await
    }

    pub async fn create_linked_account(
        &self,
        form: &LinkedAccountForm,
    ) -> ApiResult<LinkedAccount> {
        self.post("/linked-accounts", form).await
    }

    pub async fn update_linked_account(
        &self,
        id: i64,
        form: &LinkedAccountForm,
    ) -> ApiResult<LinkedAccount> {
        self.put(&format!("/linked-accounts/{}", id), form).await
    }

    pub async fn delete_linked_account(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/linked-accounts/{}", id)).await
    }

    // =========================================================================
    // Emergency funds
    // =========================================================================

    pub async fn get_emergency_funds(&self) -> ApiResult<Vec<EmergencyFund>> {
        self.get("/emergency-funds").await
    }

    pub async fn get_emergency_fund(&self, id: i64) -> ApiResult<EmergencyFund> {
        self.get(&format!("/emergency-funds/{}", id)).await
    }

    pub async fn create_emergency_fund(
        &self,
        form: &EmergencyFundForm,
    ) -> ApiResult<EmergencyFund> {
        self.post("/emergency-funds", form).await
    }

    pub async fn update_emergency_fund(
        &self,
        id: i64,
        form: &EmergencyFundForm,
    ) -> ApiResult<EmergencyFund> {
        self.put(&format!("/emergency-funds/{}", id), form).await
    }

    pub async fn delete_emergency_fund(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/emergency-funds/{}", id)).await
    }

    // =========================================================================
    // Insurance
    // =========================================================================

    pub async fn get_insurance(&self) -> ApiResult<Vec<Insurance>> {
        self.get("/insurance").await
    }

    pub async fn get_insurance_policy(&self, id: i64) -> ApiResult<Insurance> {
        self.get(&format!("/insurance/{}", id)).await
    }

    pub async fn create_insurance(&self, form: &InsuranceForm) -> ApiResult<Insurance> {
        self.post("/insurance", form).await
    }

    pub async fn update_insurance(&self, id: i64, form: &InsuranceForm) -> ApiResult<Insurance> {
        self.put(&format!("/insurance/{}", id), form).await
    }

    pub async fn delete_insurance(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/insurance/{}", id)).await
    }

    // =========================================================================
    // Alerts, tips, badges
    // =========================================================================

    pub async fn get_alerts(&self) -> ApiResult<Vec<Alert>> {
        self.get("/alerts").await
    }

    pub async fn mark_alert_read(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.put_empty(&format!("/alerts/{}/read", id)).await
    }

    pub async fn delete_alert(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/alerts/{}", id)).await
    }

    pub async fn get_tips(&self) -> ApiResult<Vec<Tip>> {
        self.get("/tips").await
    }

    pub async fn mark_tip_read(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.put_empty(&format!("/tips/{}/read", id)).await
    }

    pub async fn delete_tip(&self, id: i64) -> ApiResult<Acknowledgment> {
        self.delete(&format!("/tips/{}", id)).await
    }

    pub async fn get_badges(&self) -> ApiResult<Vec<Badge>> {
        self.get("/badges").await
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub async fn get_reports(&self) -> ApiResult<Vec<Report>> {
        self.get("/reports").await
    }

    pub async fn generate_report(&self, period: &str) -> ApiResult<Report> {
        self.post("/reports/generate", &json!({ "period": period }))
            .await
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    pub async fn get_dashboard_stats(&self, year: i32, month: u32) -> ApiResult<DashboardStats> {
        self.get(&format!(
            "/analytics/dashboard-stats?year={}&month={}",
            year, month
        ))
        .await
    }

    pub async fn get_general_stats(&self) -> ApiResult<DashboardStats> {
        self.get("/analytics/general-stats").await
    }

    pub async fn get_spending_trends(&self, months: u32) -> ApiResult<Vec<SpendingTrend>> {
        self.get(&format!("/dashboard/trends?months={}", months))
            .await
    }

    pub async fn get_monthly_stats(&self, year: i32, month: u32) -> ApiResult<MonthlyStats> {
        self.get(&format!(
            "/analytics/monthly-stats?year={}&month={}",
            year, month
        ))
        .await
    }

    pub async fn get_category_stats(&self) -> ApiResult<Vec<CategoryStats>> {
        self.get("/analytics/category-stats").await
    }

    pub async fn get_analytics_summary(&self) -> ApiResult<JsonValue> {
        self.get("/analytics/summary").await
    }

    pub async fn get_category_totals(&self) -> ApiResult<TotalsByKey> {
        self.get("/analytics/category-totals").await
    }

    pub async fn get_monthly_totals(&self, year: Option<i32>) -> ApiResult<TotalsByKey> {
        let path = match year {
            Some(year) => format!("/analytics/monthly-totals?year={}", year),
            None => "/analytics/monthly-totals".to_string(),
        };
        self.get(&path).await
    }
}

#[async_trait]
impl FinanceApi for RestClient {
    async fn health_check(&self) -> ApiResult<HealthStatus> {
        RestClient::health_check(self).await
    }

    async fn get_current_user(&self) -> ApiResult<User> {
        RestClient::get_current_user(self).await
    }

    async fn get_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ApiResult<Paginated<Transaction>> {
        RestClient::get_transactions(self, filters).await
    }

    async fn create_transaction(&self, form: &TransactionForm) -> ApiResult<Transaction> {
        RestClient::create_transaction(self, form).await
    }

    async fn update_transaction(
        &self,
        id: i64,
        patch: &TransactionPatch,
    ) -> ApiResult<Transaction> {
        RestClient::update_transaction(self, id, patch).await
    }

    async fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        RestClient::delete_transaction(self, id).await.map(|_| ())
    }

    async fn upload_transactions(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadOutcome> {
        RestClient::upload_transactions(self, file_name, bytes).await
    }
}

/// Build the error message for a non-success response
///
/// Uses the body's `error` field when present, falling back to
/// `HTTP <status>`. A `details` array is concatenated into a multi-line
/// message.
fn error_message(status: StatusCode, body: &JsonValue) -> String {
    let base = body
        .get("error")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    if let Some(details) = body.get("details").and_then(|v| v.as_array()) {
        let lines: Vec<String> = details
            .iter()
            .map(|d| match d.as_str() {
                Some(s) => s.to_string(),
                None => d.to_string(),
            })
            .collect();
        if !lines.is_empty() {
            return format!("{}\n\nDetails:\n{}", base, lines.join("\n"));
        }
    }

    base
}

/// Unwrap a `{data: ...}` envelope; any other shape passes through
fn unwrap_envelope(raw: JsonValue) -> JsonValue {
    match raw {
        JsonValue::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(JsonValue::Null)
        }
        other => other,
    }
}

/// Map transport errors to user-facing messages
fn transport_message(error: reqwest::Error) -> String {
    if error.is_timeout() {
        "Connection timed out after 30 seconds".to_string()
    } else if error.is_connect() {
        "Unable to connect to the Spendtrack API".to_string()
    } else {
        let msg = error.to_string();
        if msg.is_empty() {
            "Unknown error".to_string()
        } else {
            msg
        }
    }
}
