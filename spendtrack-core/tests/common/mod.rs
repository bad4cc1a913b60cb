//! Shared test doubles and builders

// Not every test binary exercises every helper
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use spendtrack_core::domain::{
    ApiResult, HealthStatus, Paginated, Transaction, TransactionFilters, TransactionForm,
    TransactionPatch, UploadOutcome, User,
};
use spendtrack_core::ports::FinanceApi;

/// Scripted in-memory backend
///
/// Each method pops its queue; the last queued response is sticky so
/// repeated polls keep observing it. An empty queue yields an error
/// result, which keeps unstubbed calls visible in assertions.
#[derive(Default)]
pub struct FakeApi {
    pub health: Mutex<VecDeque<ApiResult<HealthStatus>>>,
    pub current_user: Mutex<VecDeque<ApiResult<User>>>,
    pub list: Mutex<VecDeque<ApiResult<Paginated<Transaction>>>>,
    pub create: Mutex<VecDeque<ApiResult<Transaction>>>,
    pub update: Mutex<VecDeque<ApiResult<Transaction>>>,
    pub delete: Mutex<VecDeque<ApiResult<()>>>,
    pub upload: Mutex<VecDeque<ApiResult<UploadOutcome>>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn queue_health(&self, response: ApiResult<HealthStatus>) {
        self.health.lock().unwrap().push_back(response);
    }

    pub fn queue_current_user(&self, response: ApiResult<User>) {
        self.current_user.lock().unwrap().push_back(response);
    }

    pub fn queue_list(&self, response: ApiResult<Paginated<Transaction>>) {
        self.list.lock().unwrap().push_back(response);
    }

    pub fn queue_create(&self, response: ApiResult<Transaction>) {
        self.create.lock().unwrap().push_back(response);
    }

    pub fn queue_update(&self, response: ApiResult<Transaction>) {
        self.update.lock().unwrap().push_back(response);
    }

    pub fn queue_delete(&self, response: ApiResult<()>) {
        self.delete.lock().unwrap().push_back(response);
    }

    pub fn queue_upload(&self, response: ApiResult<UploadOutcome>) {
        self.upload.lock().unwrap().push_back(response);
    }

    pub fn recorded_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn next<T: Clone>(queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
        let mut queue = queue.lock().unwrap();
        match queue.len() {
            0 => ApiResult::error("no response stubbed"),
            1 => queue.front().cloned().unwrap(),
            _ => queue.pop_front().unwrap(),
        }
    }
}

#[async_trait]
impl FinanceApi for FakeApi {
    async fn health_check(&self) -> ApiResult<HealthStatus> {
        self.record("health");
        Self::next(&self.health)
    }

    async fn get_current_user(&self) -> ApiResult<User> {
        self.record("current_user");
        Self::next(&self.current_user)
    }

    async fn get_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ApiResult<Paginated<Transaction>> {
        self.record(format!(
            "list page={:?} limit={:?}",
            filters.page, filters.limit
        ));
        Self::next(&self.list)
    }

    async fn create_transaction(&self, _form: &TransactionForm) -> ApiResult<Transaction> {
        self.record("create");
        Self::next(&self.create)
    }

    async fn update_transaction(
        &self,
        id: i64,
        _patch: &TransactionPatch,
    ) -> ApiResult<Transaction> {
        self.record(format!("update {}", id));
        Self::next(&self.update)
    }

    async fn delete_transaction(&self, id: i64) -> ApiResult<()> {
        self.record(format!("delete {}", id));
        Self::next(&self.delete)
    }

    async fn upload_transactions(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> ApiResult<UploadOutcome> {
        self.record(format!("upload {}", file_name));
        Self::next(&self.upload)
    }
}

pub fn health_ok() -> ApiResult<HealthStatus> {
    ApiResult::Data(
        serde_json::from_value(json!({"status": "ok", "timestamp": "2025-06-01T00:00:00Z"}))
            .unwrap(),
    )
}

pub fn sample_user() -> User {
    serde_json::from_value(json!({"id": "u1", "username": "ada"})).unwrap()
}

pub fn sample_tx(id: i64, amount: &str) -> Transaction {
    serde_json::from_value(json!({
        "id": id,
        "amount": amount,
        "type": "expense",
        "transaction_date": "2025-01-15"
    }))
    .unwrap()
}

pub fn page_of(transactions: Vec<Transaction>, total: i64, page: u32, total_pages: u32) -> Paginated<Transaction> {
    Paginated {
        data: transactions,
        total,
        page,
        total_pages,
    }
}
