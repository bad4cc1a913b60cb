//! Backend API port
//!
//! The services depend on this trait rather than on the concrete REST
//! client so that tests can drive them with scripted responses and no
//! network.

use async_trait::async_trait;

use crate::domain::{
    ApiResult, HealthStatus, Paginated, Transaction, TransactionFilters, TransactionForm,
    TransactionPatch, UploadOutcome, User,
};

/// The subset of the backend the state services consume
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Probe `GET /health`; never attaches credentials
    async fn health_check(&self) -> ApiResult<HealthStatus>;

    /// Resolve the stored token to a user via `GET /auth/me`
    async fn get_current_user(&self) -> ApiResult<User>;

    async fn get_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ApiResult<Paginated<Transaction>>;

    async fn create_transaction(&self, form: &TransactionForm) -> ApiResult<Transaction>;

    async fn update_transaction(&self, id: i64, patch: &TransactionPatch)
        -> ApiResult<Transaction>;

    async fn delete_transaction(&self, id: i64) -> ApiResult<()>;

    /// Multipart CSV/Excel upload; `file_name` becomes the submitted
    /// filename of the `file` form field
    async fn upload_transactions(&self, file_name: &str, bytes: Vec<u8>)
        -> ApiResult<UploadOutcome>;
}
