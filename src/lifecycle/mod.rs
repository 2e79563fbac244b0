//! Generic soft-delete, hard-delete and recovery over any [`AuditableAggregate`].
//!
//! The three operations are the only writers of the delete and recovery
//! stamps on an [`EntityRecord`](crate::entity::EntityRecord). Each one
//! suspends only on store calls and checks the caller's cancellation signal
//! before every one of them.

mod handlers;
mod hard_delete;
mod recover;
mod soft_delete;
pub mod translator;

pub use handlers::{HardDeleteHandler, RecoveryHandler, SoftDeleteHandler};
pub use translator::RelationCategory;

use crate::config::LifecycleConfig;
use crate::core::{CancelSignal, LifecycleError, Result, UserId};
use crate::entity::AuditableAggregate;
use crate::messages::Messages;
use crate::store::StoreAdapter;
use std::sync::Arc;
use tracing::{Level, event};

/// Lifecycle operations bound to the store of one entity type.
///
/// Holds no entity state between calls; concurrent operations share the
/// store and rely on it to arbitrate conflicting writes.
pub struct LifecycleEngine<E: AuditableAggregate> {
    store: Arc<dyn StoreAdapter<E>>,
    config: LifecycleConfig,
    messages: Messages,
}

impl<E: AuditableAggregate> LifecycleEngine<E> {
    pub fn new(store: Arc<dyn StoreAdapter<E>>, config: LifecycleConfig) -> Self {
        let messages = Messages::new(config.locale);
        Self {
            store,
            config,
            messages,
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn StoreAdapter<E>> {
        &self.store
    }

    fn ensure_live(cancel: &CancelSignal) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(LifecycleError::Cancelled);
        }
        Ok(())
    }

    fn require_super_user(
        &self,
        acting_user: UserId,
        message: impl FnOnce(&Messages) -> String,
    ) -> Result<()> {
        if self.config.is_super_user(acting_user) {
            return Ok(());
        }
        event!(
            Level::WARN,
            entity = E::ENTITY_NAME,
            acting_user,
            "privileged lifecycle operation rejected"
        );
        Err(LifecycleError::Unauthorized(message(&self.messages)))
    }
}

impl<E: AuditableAggregate> Clone for LifecycleEngine<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            messages: self.messages,
        }
    }
}
