mod common;

use common::{SUPER_USER, SpyStore, products, spy_products};
use entity_lifecycle::domain::Product;
use entity_lifecycle::{
    AuditableAggregate, CancelSignal, ErrorKind, ForeignReference, LifecycleConfig,
    LifecycleEngine, MemoryStore, MessageLocale, RelationCategory, StoreAdapter, StoreError,
};
use std::sync::Arc;
use std::sync::atomic::Ordering;

fn engine(store: Arc<SpyStore<Product>>) -> LifecycleEngine<Product> {
    LifecycleEngine::new(store, LifecycleConfig::default())
}

async fn soft_delete_all(engine: &LifecycleEngine<Product>, ids: &[i64]) {
    assert!(engine.soft_delete(ids, 7, &CancelSignal::none()).await.unwrap());
}

#[tokio::test]
async fn test_soft_delete_marks_only_active_requested_rows() {
    let store = spy_products(1..=5);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[2]).await;

    let affected = engine
        .soft_delete_report(&[1, 2, 3, 99], 7, &CancelSignal::none())
        .await
        .unwrap();
    assert_eq!(affected, vec![1, 3]);

    for id in [1, 2, 3] {
        let row = store.memory().get(id).await.unwrap();
        assert!(row.is_deleted());
        assert_eq!(row.record().deleted_by(), Some(7));
        assert!(row.record().deleted_at().is_some());
    }
    for id in [4, 5] {
        assert!(!store.memory().get(id).await.unwrap().is_deleted());
    }
}

#[tokio::test]
async fn test_soft_delete_with_no_matches_is_success_without_writes() {
    let store = spy_products(1..=2);
    let engine = engine(store.clone());

    let ok = engine
        .soft_delete(&[40, 41], 7, &CancelSignal::none())
        .await
        .unwrap();
    assert!(ok);
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn test_soft_delete_persists_in_one_batch() {
    let store = spy_products(1..=10);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[1, 2, 3, 4, 5, 6]).await;

    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.fetch_matching_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_hard_delete_on_active_record_is_not_found_without_mutation() {
    let store = spy_products([10]);
    let engine = engine(store.clone());

    let err = engine
        .hard_delete(&[10], SUPER_USER, &CancelSignal::none())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.delete_calls.load(Ordering::SeqCst), 0);
    assert!(store.memory().contains(10).await);
}

#[tokio::test]
async fn test_hard_delete_unknown_id_issues_no_delete() {
    let store = spy_products([1]);
    let engine = engine(store.clone());

    let err = engine
        .hard_delete(&[99], SUPER_USER, &CancelSignal::none())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(store.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_hard_delete_removes_soft_deleted_rows() {
    let store = spy_products(1..=3);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[1, 2]).await;

    let removed = engine
        .hard_delete_report(&[1, 2, 3], SUPER_USER, &CancelSignal::none())
        .await
        .unwrap();
    assert_eq!(removed, vec![1, 2]);

    let cancel = CancelSignal::none();
    assert!(store.fetch_by_id(1, &cancel).await.unwrap().is_none());
    assert!(store.fetch_by_id(2, &cancel).await.unwrap().is_none());
    assert!(store.fetch_by_id(3, &cancel).await.unwrap().is_some());
}

#[tokio::test]
async fn test_privileged_operations_reject_other_users_before_any_fetch() {
    let store = spy_products(1..=3);
    let engine = engine(store.clone());
    let cancel = CancelSignal::none();

    let err = engine.hard_delete(&[1], 7, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    let err = engine.recover(1, 7, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);

    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_configured_super_user_replaces_default() {
    let store = spy_products([1]);
    let engine = LifecycleEngine::new(store.clone(), LifecycleConfig::new().super_user(42));
    let cancel = CancelSignal::none();
    engine.soft_delete(&[1], 5, &cancel).await.unwrap();

    let err = engine.hard_delete(&[1], 1, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authorization);
    assert!(engine.hard_delete(&[1], 42, &cancel).await.unwrap());
}

#[tokio::test]
async fn test_recover_is_inverse_of_soft_delete() {
    let store = spy_products([5]);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[5]).await;
    let deleted_at = store
        .memory()
        .get(5)
        .await
        .and_then(|p| p.record().deleted_at())
        .unwrap();

    let recovered = engine
        .recover(5, SUPER_USER, &CancelSignal::none())
        .await
        .unwrap();
    assert!(!recovered.is_deleted());
    assert_eq!(recovered.record().deleted_by(), None);
    assert_eq!(recovered.record().deleted_at(), None);
    assert!(recovered.record().recovered_at().unwrap() >= deleted_at);

    let persisted = store.memory().get(5).await.unwrap();
    assert_eq!(persisted, recovered);
}

#[tokio::test]
async fn test_recover_active_record_is_domain_rule_violation() {
    let store = spy_products([5]);
    let engine = engine(store.clone());
    let before = store.memory().get(5).await.unwrap();

    let err = engine
        .recover(5, SUPER_USER, &CancelSignal::none())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DomainRuleViolation);
    assert_eq!(err.to_string(), "Cannot recover a record that is not deleted");
    assert_eq!(store.writes(), 0);
    assert_eq!(store.memory().get(5).await.unwrap(), before);
}

#[tokio::test]
async fn test_recover_unknown_id_is_not_found() {
    let store = spy_products([5]);
    let engine = engine(store);

    let err = engine
        .recover(6, SUPER_USER, &CancelSignal::none())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains('6'));
}

#[tokio::test]
async fn test_re_deleting_a_recovered_record_clears_recovery_stamp() {
    let store = spy_products([5]);
    let engine = engine(store.clone());
    let cancel = CancelSignal::none();

    soft_delete_all(&engine, &[5]).await;
    engine.recover(5, SUPER_USER, &cancel).await.unwrap();
    engine.soft_delete(&[5], 8, &cancel).await.unwrap();

    let row = store.memory().get(5).await.unwrap();
    assert!(row.is_deleted());
    assert_eq!(row.record().deleted_by(), Some(8));
    assert_eq!(row.record().recovered_at(), None);
}

#[tokio::test]
async fn test_reference_conflict_is_translated() {
    let store = Arc::new(MemoryStore::with_rows("Products", products(1..=2)));
    store
        .add_reference(
            ForeignReference::new("Orders", "ProductId", 1)
                .with_constraint("FK_Orders_Products_ProductId"),
        )
        .await;
    let engine = LifecycleEngine::new(store.clone(), LifecycleConfig::default());
    let cancel = CancelSignal::none();
    engine.soft_delete(&[1, 2], 7, &cancel).await.unwrap();

    let err = engine.hard_delete(&[1, 2], SUPER_USER, &cancel).await.unwrap_err();
    match &err {
        entity_lifecycle::LifecycleError::ConstraintConflict {
            entity,
            relation,
            referencing_table,
            message,
        } => {
            assert_eq!(*entity, "Product");
            assert_eq!(*relation, RelationCategory::Order);
            assert_eq!(referencing_table.as_deref(), Some("Orders"));
            assert_eq!(
                message,
                "Cannot delete Product because the record is still linked to orders."
            );
        }
        other => panic!("Expected ConstraintConflict, got {:?}", other),
    }
    assert!(!err.to_string().contains("REFERENCE"));
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn test_reference_conflict_message_is_localized() {
    let store = spy_products([1]);
    store.fail_deletes_with(StoreError::ConstraintViolation(
        "The DELETE statement conflicted with the REFERENCE constraint \"FK_Invoices_Products\"."
            .into(),
    ));
    let engine = LifecycleEngine::new(
        store.clone(),
        LifecycleConfig::new().locale(MessageLocale::Vi),
    );
    let cancel = CancelSignal::none();
    engine.soft_delete(&[1], 7, &cancel).await.unwrap();

    let err = engine.hard_delete(&[1], SUPER_USER, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConstraintConflict);
    assert_eq!(
        err.to_string(),
        "Không thể xóa Product vì bản ghi đang được liên kết với hóa đơn."
    );
}

#[tokio::test]
async fn test_backend_failure_is_unclassified_with_source() {
    let store = spy_products([1]);
    store.fail_updates_with(StoreError::Backend("connection reset".into()));
    let engine = engine(store);

    let err = engine
        .soft_delete(&[1], 7, &CancelSignal::none())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unclassified);
    let source = std::error::Error::source(&err).unwrap().to_string();
    assert!(source.contains("connection reset"));
}

#[tokio::test]
async fn test_cancelled_before_start_touches_nothing() {
    let store = spy_products(1..=3);
    let engine = engine(store.clone());
    let cancel = CancelSignal::new();
    cancel.cancel();

    let err = engine.soft_delete(&[1], 7, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(store.total_calls(), 0);
}

#[tokio::test]
async fn test_cancel_between_fetch_and_write_aborts_commit() {
    let store = spy_products(1..=3);
    let engine = engine(store.clone());
    let cancel = CancelSignal::new();
    store.cancel_after_fetch(cancel.clone());

    let err = engine.soft_delete(&[1, 2], 7, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(store.fetch_matching_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.writes(), 0);
    assert!(!store.memory().get(1).await.unwrap().is_deleted());
}

#[tokio::test]
async fn test_cancel_between_fetch_and_delete_keeps_rows() {
    let store = spy_products(1..=2);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[1, 2]).await;

    let cancel = CancelSignal::new();
    store.cancel_after_fetch(cancel.clone());
    let err = engine
        .hard_delete(&[1, 2], SUPER_USER, &cancel)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(store.delete_calls.load(Ordering::SeqCst), 0);
    assert!(store.memory().contains(1).await);
    assert!(store.memory().contains(2).await);
}

#[tokio::test]
async fn test_cancel_between_fetch_and_recover_keeps_deletion() {
    let store = spy_products([5]);
    let engine = engine(store.clone());
    soft_delete_all(&engine, &[5]).await;
    let writes_before = store.writes();

    let cancel = CancelSignal::new();
    store.cancel_after_fetch(cancel.clone());
    let err = engine.recover(5, SUPER_USER, &cancel).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Cancelled);
    assert_eq!(store.fetch_by_id_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.writes(), writes_before);
    let row = store.memory().get(5).await.unwrap();
    assert!(row.is_deleted());
    assert_eq!(row.record().recovered_at(), None);
}

#[tokio::test]
async fn test_scenario_soft_then_hard_then_recover() {
    let store = spy_products([42]);
    let engine = engine(store.clone());
    let cancel = CancelSignal::none();

    assert!(engine.soft_delete(&[42], 7, &cancel).await.unwrap());
    let row = store.memory().get(42).await.unwrap();
    assert!(row.is_deleted());
    assert_eq!(row.record().deleted_by(), Some(7));

    assert!(engine.hard_delete(&[42], SUPER_USER, &cancel).await.unwrap());
    assert!(!store.memory().contains(42).await);

    let err = engine.recover(42, SUPER_USER, &cancel).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
