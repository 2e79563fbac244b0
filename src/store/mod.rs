//! Persistence gateway consumed by the lifecycle engine.
//!
//! The engine never owns rows: it borrows them through a [`StoreAdapter`]
//! for one operation and hands them back through an update or delete call.

mod catalog;
mod memory;

pub use catalog::{StoreCatalog, StoreProvider, resolve_store};
pub use memory::{ForeignReference, MemoryStore};

use crate::core::{CancelSignal, EntityId};
use crate::entity::AuditableAggregate;
use crate::query::EntitiesByIds;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend rejected a write because of a constraint. The text is the
    /// backend's own message and must not reach end users verbatim.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Load, list, add, update and delete access to the rows of one entity type.
///
/// Every call accepts the caller's cancellation signal. Batch calls are
/// all-or-nothing: a failed or cancelled batch leaves storage untouched.
#[async_trait]
pub trait StoreAdapter<E: AuditableAggregate>: Send + Sync {
    async fn fetch_matching(
        &self,
        predicate: &EntitiesByIds<E>,
        cancel: &CancelSignal,
    ) -> StoreResult<Vec<E>>;

    async fn fetch_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>>;

    async fn insert(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()>;

    async fn update_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()>;

    async fn update_one(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()>;

    async fn delete_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()>;
}
