use super::{MemoryStore, StoreAdapter};
use crate::core::{LifecycleError, Result};
use crate::entity::AuditableAggregate;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

type ErasedStore = Arc<dyn Any + Send + Sync>;

/// Resolves the store bound to an entity type.
///
/// Object safe so the registrar can hold any provider behind `&dyn`.
/// Typed access goes through [`resolve_store`].
pub trait StoreProvider: Send + Sync {
    /// Returns an `Arc<Arc<dyn StoreAdapter<E>>>` erased to `Any`, where `E`
    /// is the type behind `entity`.
    fn erased_store(&self, entity: TypeId) -> Option<ErasedStore>;
}

/// Typed lookup of the store for `E`.
pub fn resolve_store<E: AuditableAggregate>(
    provider: &dyn StoreProvider,
) -> Option<Arc<dyn StoreAdapter<E>>> {
    let erased = provider.erased_store(TypeId::of::<E>())?;
    erased
        .downcast::<Arc<dyn StoreAdapter<E>>>()
        .ok()
        .map(|store| Arc::clone(&*store))
}

/// Store per entity type, built once at startup.
///
/// Copy-on-write like a schema catalog: `with_*` consumes and returns a new
/// catalog, so clones handed out earlier never observe later additions.
#[derive(Clone, Default)]
pub struct StoreCatalog {
    stores: Arc<HashMap<TypeId, (&'static str, ErasedStore)>>,
}

impl StoreCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `store` to `E`. Binding a second store for the same type fails.
    pub fn with_store<E: AuditableAggregate>(
        self,
        store: Arc<dyn StoreAdapter<E>>,
    ) -> Result<Self> {
        let key = TypeId::of::<E>();
        if self.stores.contains_key(&key) {
            return Err(LifecycleError::Registration(format!(
                "A store for entity '{}' is already registered",
                E::ENTITY_NAME
            )));
        }

        let mut stores = (*self.stores).clone();
        stores.insert(key, (E::ENTITY_NAME, Arc::new(store) as ErasedStore));
        Ok(Self {
            stores: Arc::new(stores),
        })
    }

    /// Binds a fresh [`MemoryStore`] to `E` and returns it alongside the catalog.
    pub fn with_memory_store<E: AuditableAggregate>(
        self,
        table: impl Into<String>,
    ) -> Result<(Self, Arc<MemoryStore<E>>)> {
        let store = Arc::new(MemoryStore::<E>::new(table));
        let catalog = self.with_store::<E>(store.clone())?;
        Ok((catalog, store))
    }

    pub fn store<E: AuditableAggregate>(&self) -> Option<Arc<dyn StoreAdapter<E>>> {
        resolve_store::<E>(self)
    }

    pub fn contains<E: AuditableAggregate>(&self) -> bool {
        self.stores.contains_key(&TypeId::of::<E>())
    }

    pub fn entity_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.stores.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl StoreProvider for StoreCatalog {
    fn erased_store(&self, entity: TypeId) -> Option<ErasedStore> {
        self.stores.get(&entity).map(|(_, store)| Arc::clone(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CancelSignal;
    use crate::domain::{Category, Product};

    #[tokio::test]
    async fn resolves_the_store_bound_to_each_type() {
        let (catalog, categories) = StoreCatalog::new()
            .with_memory_store::<Category>("Categories")
            .unwrap();
        categories
            .insert(Category::new(1, 1, "Tools"), &CancelSignal::none())
            .await
            .unwrap();

        let resolved = catalog.store::<Category>().unwrap();
        let found = resolved.fetch_by_id(1, &CancelSignal::none()).await.unwrap();
        assert!(found.is_some());

        assert!(catalog.store::<Product>().is_none());
        assert!(!catalog.contains::<Product>());
    }

    #[test]
    fn second_store_for_same_type_is_rejected() {
        let (catalog, _) = StoreCatalog::new()
            .with_memory_store::<Category>("Categories")
            .unwrap();
        let err = catalog.with_memory_store::<Category>("Again").err().unwrap();
        assert!(err.to_string().contains("already registered"));
    }

    #[test]
    fn earlier_clones_do_not_see_later_stores() {
        let (base, _) = StoreCatalog::new()
            .with_memory_store::<Category>("Categories")
            .unwrap();
        let snapshot = base.clone();
        let (extended, _) = base.with_memory_store::<Product>("Products").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(extended.entity_names(), vec!["Category", "Product"]);
    }
}
