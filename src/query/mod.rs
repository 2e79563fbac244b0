//! Reusable selection of lifecycle candidates by id set and delete state.

use crate::core::EntityId;
use crate::entity::AuditableAggregate;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

/// Tri-state filter on the delete flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteState {
    #[default]
    Any,
    Active,
    Deleted,
}

impl DeleteState {
    #[inline]
    pub fn admits(self, is_deleted: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Active => !is_deleted,
            Self::Deleted => is_deleted,
        }
    }
}

impl From<Option<bool>> for DeleteState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Any,
            Some(false) => Self::Active,
            Some(true) => Self::Deleted,
        }
    }
}

/// Predicate `id ∈ ids AND <delete state>` over entities of type `E`.
///
/// Soft delete selects with [`DeleteState::Active`] and hard delete with
/// [`DeleteState::Deleted`], which is what keeps a hard delete from ever
/// reaching a record that was not soft-deleted first.
pub struct EntitiesByIds<E> {
    ids: BTreeSet<EntityId>,
    delete_state: DeleteState,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AuditableAggregate> EntitiesByIds<E> {
    pub fn new<I>(ids: I, delete_state: impl Into<DeleteState>) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        Self {
            ids: ids.into_iter().collect(),
            delete_state: delete_state.into(),
            _entity: PhantomData,
        }
    }

    pub fn any<I: IntoIterator<Item = EntityId>>(ids: I) -> Self {
        Self::new(ids, DeleteState::Any)
    }

    pub fn active<I: IntoIterator<Item = EntityId>>(ids: I) -> Self {
        Self::new(ids, DeleteState::Active)
    }

    pub fn deleted<I: IntoIterator<Item = EntityId>>(ids: I) -> Self {
        Self::new(ids, DeleteState::Deleted)
    }

    pub fn ids(&self) -> &BTreeSet<EntityId> {
        &self.ids
    }

    pub fn delete_state(&self) -> DeleteState {
        self.delete_state
    }

    /// An empty id set matches nothing.
    pub fn matches(&self, entity: &E) -> bool {
        self.ids.contains(&entity.id()) && self.delete_state.admits(entity.is_deleted())
    }
}

impl<E> Clone for EntitiesByIds<E> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            delete_state: self.delete_state,
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for EntitiesByIds<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitiesByIds")
            .field("ids", &self.ids)
            .field("delete_state", &self.delete_state)
            .finish()
    }
}
