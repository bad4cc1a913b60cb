//! Transaction list store behavior
//!
//! Drives the store against a scripted backend: no network, real state
//! transitions.

mod common;

use std::sync::Arc;

use spendtrack_core::adapters::MemoryTokenStore;
use spendtrack_core::domain::{ApiResult, TransactionFilters, TransactionForm, TransactionPatch, TransactionType, UploadOutcome};
use spendtrack_core::ports::FinanceApi;
use spendtrack_core::services::{AuthStateStore, TransactionStore};

use common::{page_of, sample_tx, FakeApi};

use rust_decimal::Decimal;

fn auth_with_token() -> Arc<AuthStateStore> {
    let auth = Arc::new(AuthStateStore::new(
        Arc::new(MemoryTokenStore::new()),
        Arc::new(MemoryTokenStore::new()),
    ));
    auth.login("tok-1", None, true).unwrap();
    auth
}

fn auth_without_token() -> Arc<AuthStateStore> {
    Arc::new(AuthStateStore::new(
        Arc::new(MemoryTokenStore::new()),
        Arc::new(MemoryTokenStore::new()),
    ))
}

fn store_with(api: &Arc<FakeApi>, auth: Arc<AuthStateStore>) -> TransactionStore {
    TransactionStore::new(
        Arc::clone(api) as Arc<dyn FinanceApi>,
        auth,
        TransactionFilters::default(),
    )
}

#[tokio::test]
async fn unauthenticated_load_issues_no_request() {
    let api = FakeApi::new();
    let mut store = store_with(&api, auth_without_token());

    store.load(Some(2)).await;

    assert!(!store.is_loading());
    assert!(store.error().is_none());
    assert!(store.transactions().is_empty());
    assert!(api.recorded_calls().is_empty());
}

#[tokio::test]
async fn load_success_replaces_state_and_trusts_server_page() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00"), sample_tx(2, "20.00")],
        42,
        3,
        5,
    )));
    let mut store = store_with(&api, auth_with_token());

    // Ask for page 2; the server answers page 3 and the server wins
    store.load(Some(2)).await;

    assert!(!store.is_loading());
    assert!(store.error().is_none());
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.total(), 42);
    assert_eq!(store.total_pages(), 5);
    assert_eq!(store.current_page(), 3);
}

#[tokio::test]
async fn load_applies_default_limit() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(vec![], 0, 1, 0)));
    let mut store = store_with(&api, auth_with_token());

    store.load(None).await;

    assert_eq!(
        api.recorded_calls(),
        vec!["list page=Some(1) limit=Some(20)"]
    );
}

#[tokio::test]
async fn load_error_keeps_previous_list() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00")],
        1,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;
    assert_eq!(store.transactions().len(), 1);

    api.queue_list(ApiResult::error("backend down"));
    store.refresh().await;

    assert_eq!(store.error(), Some("backend down"));
    assert_eq!(store.transactions().len(), 1);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn create_prepends_exactly_one_record() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00"), sample_tx(2, "20.00")],
        2,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;

    api.queue_create(ApiResult::Data(sample_tx(99, "5.00")));
    let form = TransactionForm {
        amount: Decimal::new(500, 2),
        transaction_type: TransactionType::Expense,
        category_id: None,
        description: None,
        transaction_date: "2025-01-15".parse().unwrap(),
    };
    let created = store.create(&form).await;

    assert_eq!(created.unwrap().id, 99);
    assert_eq!(store.transactions().len(), 3);
    assert_eq!(store.transactions()[0].id, 99);
    // Existing order preserved
    assert_eq!(store.transactions()[1].id, 1);
    assert_eq!(store.transactions()[2].id, 2);
}

#[tokio::test]
async fn create_failure_sets_error_and_returns_none() {
    let api = FakeApi::new();
    api.queue_create(ApiResult::error("amount is required"));
    let mut store = store_with(&api, auth_with_token());

    let form = TransactionForm {
        amount: Decimal::ZERO,
        transaction_type: TransactionType::Income,
        category_id: None,
        description: None,
        transaction_date: "2025-01-15".parse().unwrap(),
    };
    let created = store.create(&form).await;

    assert!(created.is_none());
    assert_eq!(store.error(), Some("amount is required"));
    assert!(store.transactions().is_empty());
}

#[tokio::test]
async fn update_replaces_matching_record_in_place() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00"), sample_tx(2, "20.00")],
        2,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;

    api.queue_update(ApiResult::Data(sample_tx(2, "99.00")));
    let patch = TransactionPatch {
        amount: Some(Decimal::new(9900, 2)),
        ..Default::default()
    };
    let updated = store.update(2, &patch).await;

    assert!(updated.is_some());
    assert_eq!(store.transactions().len(), 2);
    assert_eq!(store.transactions()[0].amount, Decimal::new(1000, 2));
    assert_eq!(store.transactions()[1].amount, Decimal::new(9900, 2));
}

#[tokio::test]
async fn delete_removes_matching_and_leaves_totals_stale() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00"), sample_tx(2, "20.00")],
        42,
        1,
        3,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;

    api.queue_delete(ApiResult::Data(()));
    assert!(store.delete(1).await);

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.transactions()[0].id, 2);
    // Counters are reconciled by the next load, not by delete
    assert_eq!(store.total(), 42);
    assert_eq!(store.total_pages(), 3);
}

#[tokio::test]
async fn delete_of_unknown_id_is_a_silent_noop() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00")],
        1,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;

    api.queue_delete(ApiResult::Data(()));
    assert!(store.delete(777).await);

    assert_eq!(store.transactions().len(), 1);
    assert!(store.error().is_none());
}

#[tokio::test]
async fn delete_failure_leaves_list_untouched() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(1, "10.00")],
        1,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());
    store.load(None).await;

    api.queue_delete(ApiResult::error("not yours"));
    assert!(!store.delete(1).await);

    assert_eq!(store.transactions().len(), 1);
    assert_eq!(store.error(), Some("not yours"));
}

#[tokio::test]
async fn upload_success_triggers_full_reload() {
    let api = FakeApi::new();
    api.queue_upload(ApiResult::Data(UploadOutcome {
        message: "imported".to_string(),
        count: 3,
    }));
    api.queue_list(ApiResult::Data(page_of(
        vec![sample_tx(10, "1.00"), sample_tx(11, "2.00"), sample_tx(12, "3.00")],
        3,
        1,
        1,
    )));
    let mut store = store_with(&api, auth_with_token());

    let outcome = store.upload("tx.csv", b"date,amount\n".to_vec()).await;

    assert_eq!(outcome.unwrap().count, 3);
    // The list reflects server state after the reload, not a local merge
    assert_eq!(store.transactions().len(), 3);
    assert!(!store.is_loading());

    let calls = api.recorded_calls();
    assert_eq!(calls[0], "upload tx.csv");
    assert!(calls[1].starts_with("list"));
}

#[tokio::test]
async fn upload_failure_skips_reload() {
    let api = FakeApi::new();
    api.queue_upload(ApiResult::error("bad file"));
    let mut store = store_with(&api, auth_with_token());

    let outcome = store.upload("tx.csv", vec![]).await;

    assert!(outcome.is_none());
    assert_eq!(store.error(), Some("bad file"));
    assert_eq!(api.recorded_calls(), vec!["upload tx.csv"]);
}

#[tokio::test]
async fn set_filters_reloads_from_page_one() {
    let api = FakeApi::new();
    api.queue_list(ApiResult::Data(page_of(vec![], 0, 1, 0)));
    let mut store = store_with(&api, auth_with_token());

    store
        .set_filters(TransactionFilters {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        })
        .await;

    assert_eq!(
        api.recorded_calls(),
        vec!["list page=Some(1) limit=Some(20)"]
    );
    assert_eq!(
        store.filters().transaction_type,
        Some(TransactionType::Expense)
    );
}
