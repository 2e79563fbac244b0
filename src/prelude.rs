//! Recommended entrypoints grouped by abstraction level.
//!
//! `app` is what request-handling code needs: commands, the mediator and the
//! startup registration. `advanced` exposes the engine and store seams for
//! custom adapters and tests.

pub mod app {
    //! Dispatch lifecycle commands through a registered mediator.
    pub use crate::{
        AuditableAggregate, CancelSignal, EntityRecord, ErrorKind, HardDeleteCommand,
        LifecycleConfig, LifecycleError, Mediator, RecoverCommand, SoftDeleteCommand,
        StoreCatalog, entity_descriptors, impl_auditable_aggregate, register_lifecycle_handlers,
    };
}

pub mod advanced {
    //! Engine, predicate and store internals.
    pub use crate::lifecycle::translator;
    pub use crate::{
        DeleteState, EntitiesByIds, ForeignReference, HandlerRegistrar, LifecycleEngine,
        MediatorBuilder, MemoryStore, StoreAdapter, StoreError, StoreProvider,
    };
}
