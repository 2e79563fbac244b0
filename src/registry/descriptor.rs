use crate::config::LifecycleConfig;
use crate::core::{LifecycleError, Result};
use crate::dispatch::{HardDeleteCommand, MediatorBuilder, RecoverCommand, SoftDeleteCommand};
use crate::entity::AuditableAggregate;
use crate::lifecycle::{HardDeleteHandler, LifecycleEngine, RecoveryHandler, SoftDeleteHandler};
use crate::store::{StoreProvider, resolve_store};
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

type BindFn = fn(&mut MediatorBuilder, &dyn StoreProvider, &LifecycleConfig) -> Result<()>;
type CheckFn = fn(&MediatorBuilder) -> Result<()>;

/// Type tag of one lifecycle-managed aggregate plus the monomorphized code
/// that binds its handlers.
#[derive(Clone, Copy)]
pub struct EntityDescriptor {
    name: &'static str,
    type_id: TypeId,
    check: CheckFn,
    bind: BindFn,
}

impl EntityDescriptor {
    pub fn of<E: AuditableAggregate>() -> Self {
        Self {
            name: E::ENTITY_NAME,
            type_id: TypeId::of::<E>(),
            check: ensure_unbound::<E>,
            bind: bind_lifecycle_handlers::<E>,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fails when any lifecycle command of this type is already in `builder`.
    pub(crate) fn check(&self, builder: &MediatorBuilder) -> Result<()> {
        (self.check)(builder)
    }

    pub(crate) fn bind(
        &self,
        builder: &mut MediatorBuilder,
        provider: &dyn StoreProvider,
        config: &LifecycleConfig,
    ) -> Result<()> {
        (self.bind)(builder, provider, config)
    }
}

impl fmt::Debug for EntityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDescriptor")
            .field("name", &self.name)
            .field("type_id", &self.type_id)
            .finish()
    }
}

fn ensure_unbound<E: AuditableAggregate>(builder: &MediatorBuilder) -> Result<()> {
    if builder.is_bound::<SoftDeleteCommand<E>>()
        || builder.is_bound::<HardDeleteCommand<E>>()
        || builder.is_bound::<RecoverCommand<E>>()
    {
        return Err(LifecycleError::Registration(format!(
            "Lifecycle handlers for '{}' are already bound",
            E::ENTITY_NAME
        )));
    }
    Ok(())
}

fn bind_lifecycle_handlers<E: AuditableAggregate>(
    builder: &mut MediatorBuilder,
    provider: &dyn StoreProvider,
    config: &LifecycleConfig,
) -> Result<()> {
    ensure_unbound::<E>(builder)?;

    let store = resolve_store::<E>(provider).ok_or_else(|| {
        LifecycleError::Registration(format!(
            "No store registered for entity '{}'",
            E::ENTITY_NAME
        ))
    })?;
    let engine = LifecycleEngine::new(store, config.clone());

    builder.register::<SoftDeleteCommand<E>>(Arc::new(SoftDeleteHandler::new(engine.clone())))?;
    builder.register::<HardDeleteCommand<E>>(Arc::new(HardDeleteHandler::new(engine.clone())))?;
    builder.register::<RecoverCommand<E>>(Arc::new(RecoveryHandler::new(engine)))?;
    Ok(())
}
