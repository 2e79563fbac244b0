// ============================================================================
// Entity Lifecycle Library
// ============================================================================
//
// Generic soft-delete, hard-delete and recovery for auditable aggregates,
// dispatched through a mediator whose handlers are bound once at startup for
// every registered entity type.

pub mod config;
pub mod core;
pub mod dispatch;
pub mod domain;
pub mod entity;
pub mod lifecycle;
pub mod messages;
pub mod prelude;
pub mod query;
pub mod registry;
pub mod store;

// Re-export main types for convenience
pub use crate::config::{LifecycleConfig, MessageLocale};
pub use crate::core::{
    CancelSignal, EntityId, ErrorKind, LifecycleError, Result, Timestamp, UserId,
};
pub use dispatch::{
    Command, HardDeleteCommand, Mediator, MediatorBuilder, RecoverCommand, RequestHandler,
    SoftDeleteCommand,
};
pub use entity::{AuditableAggregate, EntityRecord};
pub use lifecycle::{LifecycleEngine, RelationCategory};
pub use query::{DeleteState, EntitiesByIds};
pub use registry::{
    EntityDescriptor, HandlerRegistrar, RegistrationReport, register_lifecycle_handlers,
};
pub use store::{
    ForeignReference, MemoryStore, StoreAdapter, StoreCatalog, StoreError, StoreProvider,
    StoreResult,
};
