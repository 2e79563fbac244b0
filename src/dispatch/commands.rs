use super::Command;
use crate::core::{EntityId, UserId};
use crate::entity::AuditableAggregate;
use std::fmt;
use std::marker::PhantomData;

macro_rules! debug_with_entity {
    ($cmd:ident { $($field:ident),* }) => {
        impl<E: AuditableAggregate> fmt::Debug for $cmd<E> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($cmd))
                    .field("entity", &E::ENTITY_NAME)
                    $(.field(stringify!($field), &self.$field))*
                    .finish()
            }
        }
    };
}

/// Soft-delete the active records among `ids` of entity type `E`.
#[derive(Clone, PartialEq, Eq)]
pub struct SoftDeleteCommand<E> {
    pub ids: Vec<EntityId>,
    pub acting_user: UserId,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AuditableAggregate> SoftDeleteCommand<E> {
    pub fn new(ids: impl Into<Vec<EntityId>>, acting_user: UserId) -> Self {
        Self {
            ids: ids.into(),
            acting_user,
            _entity: PhantomData,
        }
    }
}

impl<E: AuditableAggregate> Command for SoftDeleteCommand<E> {
    type Output = bool;
}

debug_with_entity!(SoftDeleteCommand { ids, acting_user });

/// Permanently delete the soft-deleted records among `ids` of entity type `E`.
#[derive(Clone, PartialEq, Eq)]
pub struct HardDeleteCommand<E> {
    pub ids: Vec<EntityId>,
    pub acting_user: UserId,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AuditableAggregate> HardDeleteCommand<E> {
    pub fn new(ids: impl Into<Vec<EntityId>>, acting_user: UserId) -> Self {
        Self {
            ids: ids.into(),
            acting_user,
            _entity: PhantomData,
        }
    }
}

impl<E: AuditableAggregate> Command for HardDeleteCommand<E> {
    type Output = bool;
}

debug_with_entity!(HardDeleteCommand { ids, acting_user });

/// Recover one soft-deleted record of entity type `E`; yields the recovered entity.
#[derive(Clone, PartialEq, Eq)]
pub struct RecoverCommand<E> {
    pub id: EntityId,
    pub acting_user: UserId,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AuditableAggregate> RecoverCommand<E> {
    pub fn new(id: EntityId, acting_user: UserId) -> Self {
        Self {
            id,
            acting_user,
            _entity: PhantomData,
        }
    }
}

impl<E: AuditableAggregate> Command for RecoverCommand<E> {
    type Output = E;
}

debug_with_entity!(RecoverCommand { id, acting_user });
