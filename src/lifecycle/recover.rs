use super::LifecycleEngine;
use crate::core::{CancelSignal, EntityId, LifecycleError, Result, UserId, now};
use crate::entity::AuditableAggregate;
use tracing::{Instrument, Level, event, info_span};

impl<E: AuditableAggregate> LifecycleEngine<E> {
    /// Brings a soft-deleted record back and returns it as persisted.
    ///
    /// Super user only. Fails with `NotFound` for an unknown id and with
    /// `DomainRule` when the record is not deleted; neither case writes.
    pub async fn recover(
        &self,
        id: EntityId,
        acting_user: UserId,
        cancel: &CancelSignal,
    ) -> Result<E> {
        let span = info_span!(
            "lifecycle.recover",
            entity = E::ENTITY_NAME,
            acting_user,
            id
        );

        async move {
            self.require_super_user(acting_user, |m| m.unauthorized_recover())?;

            Self::ensure_live(cancel)?;
            let mut entity = self
                .store
                .fetch_by_id(id, cancel)
                .await
                .map_err(|err| self.recover_failure(err))?
                .ok_or_else(|| LifecycleError::NotFound(self.messages.record_not_found(id)))?;

            if !entity.is_deleted() {
                return Err(LifecycleError::DomainRule(self.messages.cannot_recover_active()));
            }

            // recovered_at must not precede deleted_at, even under clock skew
            let at = match entity.record().deleted_at() {
                Some(deleted_at) => deleted_at.max(now()),
                None => now(),
            };
            entity.record_mut().mark_recovered(at);

            Self::ensure_live(cancel)?;
            self.store
                .update_one(entity.clone(), cancel)
                .await
                .map_err(|err| self.recover_failure(err))?;

            event!(Level::INFO, "record recovered");
            Ok(entity)
        }
        .instrument(span)
        .await
    }

    fn recover_failure(&self, err: crate::store::StoreError) -> LifecycleError {
        event!(Level::ERROR, entity = E::ENTITY_NAME, error = %err, "recovery failed");
        LifecycleError::from_store(err, self.messages.recover_failed())
    }
}
