use super::LifecycleEngine;
use super::translator::translate_delete_failure;
use crate::core::{CancelSignal, EntityId, LifecycleError, Result, UserId};
use crate::entity::AuditableAggregate;
use crate::query::EntitiesByIds;
use tracing::{Instrument, Level, event, info_span};

impl<E: AuditableAggregate> LifecycleEngine<E> {
    /// Physically removes the soft-deleted records among `ids`.
    ///
    /// Only the super user may call this, and the check happens before any
    /// store access. Fails with `NotFound` when no id is currently
    /// soft-deleted. A delete blocked by a referencing row surfaces as
    /// `ConstraintConflict` naming the relation, never the backend text.
    pub async fn hard_delete(
        &self,
        ids: &[EntityId],
        acting_user: UserId,
        cancel: &CancelSignal,
    ) -> Result<bool> {
        self.hard_delete_report(ids, acting_user, cancel)
            .await
            .map(|_| true)
    }

    /// Same as [`hard_delete`](Self::hard_delete), returning the removed ids.
    pub async fn hard_delete_report(
        &self,
        ids: &[EntityId],
        acting_user: UserId,
        cancel: &CancelSignal,
    ) -> Result<Vec<EntityId>> {
        let span = info_span!(
            "lifecycle.hard_delete",
            entity = E::ENTITY_NAME,
            acting_user,
            requested = ids.len()
        );

        async move {
            self.require_super_user(acting_user, |m| m.unauthorized_hard_delete())?;

            let predicate = EntitiesByIds::<E>::deleted(ids.iter().copied());

            Self::ensure_live(cancel)?;
            let candidates = self
                .store
                .fetch_matching(&predicate, cancel)
                .await
                .map_err(|err| {
                    LifecycleError::from_store(err, self.messages.delete_failed(E::ENTITY_NAME))
                })?;

            // The adapter is not required to honor the delete-state filter.
            let to_delete: Vec<E> = candidates.into_iter().filter(|e| e.is_deleted()).collect();
            if to_delete.is_empty() {
                event!(Level::DEBUG, "no soft-deleted records matched");
                return Err(LifecycleError::NotFound(self.messages.no_records_found()));
            }
            let removed: Vec<EntityId> = to_delete.iter().map(|e| e.id()).collect();

            Self::ensure_live(cancel)?;
            self.store
                .delete_batch(to_delete, cancel)
                .await
                .map_err(|err| translate_delete_failure(E::ENTITY_NAME, err, &self.messages))?;

            event!(Level::INFO, removed = removed.len(), "hard delete committed");
            Ok(removed)
        }
        .instrument(span)
        .await
    }
}
