use super::EntityRecord;
use crate::core::EntityId;

/// Capability every lifecycle-managed aggregate root exposes.
///
/// Combines identity, audit stamps and typed access to the delete flag. The
/// lifecycle engine and the handler registrar are generic over this one trait.
pub trait AuditableAggregate: Clone + Send + Sync + 'static {
    /// Stable type tag, used in messages and for registration collisions.
    const ENTITY_NAME: &'static str;

    fn record(&self) -> &EntityRecord;

    fn record_mut(&mut self) -> &mut EntityRecord;

    fn id(&self) -> EntityId {
        self.record().id()
    }

    fn is_deleted(&self) -> bool {
        self.record().is_deleted()
    }
}

/// Implements [`AuditableAggregate`] for a struct embedding an [`EntityRecord`].
///
/// ```
/// use entity_lifecycle::{EntityRecord, impl_auditable_aggregate};
///
/// #[derive(Clone)]
/// struct Supplier {
///     record: EntityRecord,
///     name: String,
/// }
///
/// impl_auditable_aggregate!(Supplier, record);
/// ```
#[macro_export]
macro_rules! impl_auditable_aggregate {
    ($ty:ident, $field:ident) => {
        $crate::impl_auditable_aggregate!($ty, $field, stringify!($ty));
    };
    ($ty:ident, $field:ident, $name:expr) => {
        impl $crate::entity::AuditableAggregate for $ty {
            const ENTITY_NAME: &'static str = $name;

            fn record(&self) -> &$crate::entity::EntityRecord {
                &self.$field
            }

            fn record_mut(&mut self) -> &mut $crate::entity::EntityRecord {
                &mut self.$field
            }
        }
    };
}
