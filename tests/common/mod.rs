#![allow(dead_code)]

use async_trait::async_trait;
use entity_lifecycle::domain::{Category, Product};
use entity_lifecycle::{
    AuditableAggregate, CancelSignal, EntitiesByIds, EntityId, MemoryStore, StoreAdapter,
    StoreError, StoreResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Store wrapper counting every adapter call, with optional injected failures.
pub struct SpyStore<E> {
    inner: MemoryStore<E>,
    pub fetch_matching_calls: AtomicUsize,
    pub fetch_by_id_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    delete_failure: Mutex<Option<StoreError>>,
    update_failure: Mutex<Option<StoreError>>,
    cancel_on_fetch: Mutex<Option<CancelSignal>>,
}

impl<E: AuditableAggregate> SpyStore<E> {
    pub fn new(rows: impl IntoIterator<Item = E>) -> Self {
        Self {
            inner: MemoryStore::with_rows("spy", rows),
            fetch_matching_calls: AtomicUsize::new(0),
            fetch_by_id_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            delete_failure: Mutex::new(None),
            update_failure: Mutex::new(None),
            cancel_on_fetch: Mutex::new(None),
        }
    }

    pub fn memory(&self) -> &MemoryStore<E> {
        &self.inner
    }

    pub fn fail_deletes_with(&self, err: StoreError) {
        *self.delete_failure.lock().unwrap() = Some(err);
    }

    pub fn fail_updates_with(&self, err: StoreError) {
        *self.update_failure.lock().unwrap() = Some(err);
    }

    /// Fires `signal` while the operation is between its fetch and its write.
    pub fn cancel_after_fetch(&self, signal: CancelSignal) {
        *self.cancel_on_fetch.lock().unwrap() = Some(signal);
    }

    pub fn total_calls(&self) -> usize {
        self.fetch_matching_calls.load(Ordering::SeqCst)
            + self.fetch_by_id_calls.load(Ordering::SeqCst)
            + self.update_calls.load(Ordering::SeqCst)
            + self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst) + self.delete_calls.load(Ordering::SeqCst)
    }

    fn fire_cancel(&self) {
        if let Some(signal) = self.cancel_on_fetch.lock().unwrap().as_ref() {
            signal.cancel();
        }
    }
}

#[async_trait]
impl<E: AuditableAggregate> StoreAdapter<E> for SpyStore<E> {
    async fn fetch_matching(
        &self,
        predicate: &EntitiesByIds<E>,
        cancel: &CancelSignal,
    ) -> StoreResult<Vec<E>> {
        self.fetch_matching_calls.fetch_add(1, Ordering::SeqCst);
        let rows = self.inner.fetch_matching(predicate, cancel).await;
        self.fire_cancel();
        rows
    }

    async fn fetch_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>> {
        self.fetch_by_id_calls.fetch_add(1, Ordering::SeqCst);
        let row = self.inner.fetch_by_id(id, cancel).await;
        self.fire_cancel();
        row
    }

    async fn insert(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()> {
        self.inner.insert(entity, cancel).await
    }

    async fn update_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.update_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.inner.update_batch(entities, cancel).await
    }

    async fn update_one(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()> {
        self.update_batch(vec![entity], cancel).await
    }

    async fn delete_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.delete_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.inner.delete_batch(entities, cancel).await
    }
}

pub const SUPER_USER: i64 = 1;

pub fn products(ids: impl IntoIterator<Item = EntityId>) -> Vec<Product> {
    ids.into_iter()
        .map(|id| Product::new(id, 2, format!("P-{:03}", id), format!("Product {}", id)))
        .collect()
}

pub fn categories(ids: impl IntoIterator<Item = EntityId>) -> Vec<Category> {
    ids.into_iter()
        .map(|id| Category::new(id, 2, format!("Category {}", id)))
        .collect()
}

pub fn spy_products(ids: impl IntoIterator<Item = EntityId>) -> Arc<SpyStore<Product>> {
    Arc::new(SpyStore::new(products(ids)))
}
