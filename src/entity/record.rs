use crate::core::{EntityId, Timestamp, UserId, now};
use serde::{Deserialize, Serialize};

/// Identity and audit state embedded in every lifecycle-managed aggregate.
///
/// `id` and the creation stamps are write-once. Delete and recovery stamps
/// can only be changed from inside the crate, by the lifecycle engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    id: EntityId,
    created_by: UserId,
    created_at: Timestamp,
    updated_by: Option<UserId>,
    updated_at: Option<Timestamp>,
    is_deleted: bool,
    deleted_by: Option<UserId>,
    deleted_at: Option<Timestamp>,
    recovered_at: Option<Timestamp>,
}

impl EntityRecord {
    /// Creates an active record stamped as created now by `created_by`.
    pub fn new(id: EntityId, created_by: UserId) -> Self {
        Self::created_at(id, created_by, now())
    }

    pub fn created_at(id: EntityId, created_by: UserId, at: Timestamp) -> Self {
        Self {
            id,
            created_by,
            created_at: at,
            updated_by: None,
            updated_at: None,
            is_deleted: false,
            deleted_by: None,
            deleted_at: None,
            recovered_at: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn created_by(&self) -> UserId {
        self.created_by
    }

    pub fn creation_time(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_by(&self) -> Option<UserId> {
        self.updated_by
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        self.updated_at
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn deleted_by(&self) -> Option<UserId> {
        self.deleted_by
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        self.deleted_at
    }

    pub fn recovered_at(&self) -> Option<Timestamp> {
        self.recovered_at
    }

    /// Stamps a domain mutation.
    pub fn mark_updated(&mut self, user: UserId) {
        self.updated_by = Some(user);
        self.updated_at = Some(now());
    }

    /// A previous recovery stamp is cleared so a deleted record never looks
    /// freshly recovered.
    pub(crate) fn mark_soft_deleted(&mut self, user: UserId, at: Timestamp) {
        self.is_deleted = true;
        self.deleted_by = Some(user);
        self.deleted_at = Some(at);
        self.recovered_at = None;
    }

    pub(crate) fn mark_recovered(&mut self, at: Timestamp) {
        self.is_deleted = false;
        self.deleted_by = None;
        self.deleted_at = None;
        self.recovered_at = Some(at);
    }
}
