use super::LifecycleEngine;
use crate::core::{CancelSignal, EntityId, LifecycleError, Result, UserId, now};
use crate::entity::AuditableAggregate;
use crate::query::EntitiesByIds;
use tracing::{Instrument, Level, event, info_span};

impl<E: AuditableAggregate> LifecycleEngine<E> {
    /// Marks every active record among `ids` as deleted by `acting_user`.
    ///
    /// Ids that are unknown or already deleted are ignored. Matching nothing
    /// is a successful no-op, unlike [`hard_delete`](Self::hard_delete).
    pub async fn soft_delete(
        &self,
        ids: &[EntityId],
        acting_user: UserId,
        cancel: &CancelSignal,
    ) -> Result<bool> {
        self.soft_delete_report(ids, acting_user, cancel)
            .await
            .map(|_| true)
    }

    /// Same as [`soft_delete`](Self::soft_delete), returning the ids that changed state.
    pub async fn soft_delete_report(
        &self,
        ids: &[EntityId],
        acting_user: UserId,
        cancel: &CancelSignal,
    ) -> Result<Vec<EntityId>> {
        let span = info_span!(
            "lifecycle.soft_delete",
            entity = E::ENTITY_NAME,
            acting_user,
            requested = ids.len()
        );

        async move {
            let predicate = EntitiesByIds::<E>::active(ids.iter().copied());

            Self::ensure_live(cancel)?;
            let mut entities = self
                .store
                .fetch_matching(&predicate, cancel)
                .await
                .map_err(|err| self.soft_delete_failure(err))?;

            if entities.is_empty() {
                event!(Level::DEBUG, "no active records matched");
                return Ok(Vec::new());
            }

            let at = now();
            for entity in &mut entities {
                entity.record_mut().mark_soft_deleted(acting_user, at);
            }
            let affected: Vec<EntityId> = entities.iter().map(|e| e.id()).collect();

            Self::ensure_live(cancel)?;
            self.store
                .update_batch(entities, cancel)
                .await
                .map_err(|err| self.soft_delete_failure(err))?;

            event!(Level::DEBUG, affected = affected.len(), "soft delete committed");
            Ok(affected)
        }
        .instrument(span)
        .await
    }

    fn soft_delete_failure(&self, err: crate::store::StoreError) -> LifecycleError {
        event!(Level::ERROR, entity = E::ENTITY_NAME, error = %err, "soft delete failed");
        LifecycleError::from_store(err, self.messages.soft_delete_failed(E::ENTITY_NAME))
    }
}
