//! Transaction list store
//!
//! Owns the paginated in-memory transaction list the UI renders: current
//! filters, pagination counters, a loading flag, and the last error
//! message. All mutation happens through this struct's own methods, so the
//! state needs no locking.
//!
//! Mutations are optimistic: create prepends the record the server
//! returned, update replaces in place, delete removes locally. Uploads are
//! the exception: the server may dedup or aggregate, so a full reload
//! follows every successful upload.

use std::sync::Arc;

use log::debug;

use crate::domain::{
    ApiResult, Transaction, TransactionFilters, TransactionForm, TransactionPatch, UploadOutcome,
};
use crate::ports::FinanceApi;

use super::AuthStateStore;

/// Default page size when the filters do not specify one
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Paginated transaction list state
pub struct TransactionStore {
    api: Arc<dyn FinanceApi>,
    auth: Arc<AuthStateStore>,
    filters: TransactionFilters,
    transactions: Vec<Transaction>,
    loading: bool,
    error: Option<String>,
    total: i64,
    current_page: u32,
    total_pages: u32,
    // Bumped per load; a completion only applies if it is still the latest
    load_generation: u64,
}

impl TransactionStore {
    pub fn new(
        api: Arc<dyn FinanceApi>,
        auth: Arc<AuthStateStore>,
        filters: TransactionFilters,
    ) -> Self {
        Self {
            api,
            auth,
            filters,
            transactions: Vec::new(),
            loading: false,
            error: None,
            total: 0,
            current_page: 1,
            total_pages: 0,
            load_generation: 0,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn filters(&self) -> &TransactionFilters {
        &self.filters
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load a page of transactions with the current filters
    ///
    /// Without a stored token this is a guard, not an error: loading is
    /// cleared and no request is issued. On success the list and all
    /// pagination counters are replaced together, and `current_page`
    /// follows the server-reported page. On failure only the error message
    /// changes; the previous list stays.
    pub async fn load(&mut self, page: Option<u32>) {
        if !self.auth.is_logged_in() {
            self.loading = false;
            return;
        }

        self.loading = true;
        self.error = None;

        self.load_generation += 1;
        let generation = self.load_generation;

        let mut request = self.filters.clone();
        request.page = Some(page.unwrap_or(self.current_page));
        request.limit = Some(request.limit.unwrap_or(DEFAULT_PAGE_LIMIT));

        let response = self.api.get_transactions(&request).await;

        // A newer load has been issued since this one started; its result
        // wins and this one is dropped
        if generation != self.load_generation {
            debug!("dropping stale load result (generation {})", generation);
            return;
        }

        match response {
            ApiResult::Data(page) => {
                self.transactions = page.data;
                self.total = page.total;
                self.total_pages = page.total_pages;
                self.current_page = page.page;
            }
            ApiResult::Error(msg) => {
                self.error = Some(msg);
            }
        }

        self.loading = false;
    }

    /// Jump to a page
    pub async fn go_to_page(&mut self, page: u32) {
        self.load(Some(page)).await;
    }

    /// Reload the current page
    pub async fn refresh(&mut self) {
        self.load(None).await;
    }

    /// Replace the filters and reload from page 1
    pub async fn set_filters(&mut self, filters: TransactionFilters) {
        self.filters = filters;
        self.current_page = 1;
        self.load(Some(1)).await;
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a transaction; on success the new record is prepended
    pub async fn create(&mut self, form: &TransactionForm) -> Option<Transaction> {
        self.loading = true;
        self.error = None;

        let result = match self.api.create_transaction(form).await {
            ApiResult::Data(tx) => {
                self.transactions.insert(0, tx.clone());
                Some(tx)
            }
            ApiResult::Error(msg) => {
                self.error = Some(msg);
                None
            }
        };

        self.loading = false;
        result
    }

    /// Update a transaction; on success the matching record is replaced in
    /// place, other records are untouched
    pub async fn update(&mut self, id: i64, patch: &TransactionPatch) -> Option<Transaction> {
        self.loading = true;
        self.error = None;

        let result = match self.api.update_transaction(id, patch).await {
            ApiResult::Data(tx) => {
                for existing in self.transactions.iter_mut() {
                    if existing.id == id {
                        *existing = tx.clone();
                    }
                }
                Some(tx)
            }
            ApiResult::Error(msg) => {
                self.error = Some(msg);
                None
            }
        };

        self.loading = false;
        result
    }

    /// Delete a transaction; a miss in the local list is a silent no-op
    ///
    /// `total` and `total_pages` are intentionally left as reported by the
    /// last load; the next load reconciles them.
    pub async fn delete(&mut self, id: i64) -> bool {
        self.loading = true;
        self.error = None;

        let deleted = match self.api.delete_transaction(id).await {
            ApiResult::Data(()) => {
                self.transactions.retain(|tx| tx.id != id);
                true
            }
            ApiResult::Error(msg) => {
                self.error = Some(msg);
                false
            }
        };

        self.loading = false;
        deleted
    }

    /// Upload a transactions file, then reload the list
    ///
    /// The upload result is never merged incrementally; a full reload
    /// resynchronizes the list and counters with whatever the server kept.
    pub async fn upload(&mut self, file_name: &str, bytes: Vec<u8>) -> Option<UploadOutcome> {
        self.loading = true;
        self.error = None;

        let outcome = match self.api.upload_transactions(file_name, bytes).await {
            ApiResult::Data(outcome) => Some(outcome),
            ApiResult::Error(msg) => {
                self.error = Some(msg);
                None
            }
        };

        if outcome.is_some() {
            self.load(None).await;
        } else {
            self.loading = false;
        }

        outcome
    }
}
