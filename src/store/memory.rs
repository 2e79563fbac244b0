use super::{StoreAdapter, StoreError, StoreResult};
use crate::core::{CancelSignal, EntityId};
use crate::entity::AuditableAggregate;
use crate::query::EntitiesByIds;
use async_trait::async_trait;
use log::{debug, warn};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// A row in another table that points at a row of this store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignReference {
    /// Constraint name, e.g. `FK_Orders_Products_ProductId`
    pub constraint: String,
    /// Table holding the referencing row
    pub referencing_table: String,
    /// Column holding the referenced key
    pub column: String,
    /// Referenced row in this store
    pub target_id: EntityId,
}

impl ForeignReference {
    pub fn new(
        referencing_table: impl Into<String>,
        column: impl Into<String>,
        target_id: EntityId,
    ) -> Self {
        let referencing_table = referencing_table.into();
        let column = column.into();
        Self {
            constraint: format!("FK_{}_{}", referencing_table, column),
            referencing_table,
            column,
            target_id,
        }
    }

    pub fn with_constraint(mut self, constraint: impl Into<String>) -> Self {
        self.constraint = constraint.into();
        self
    }
}

/// In-memory table for one entity type.
///
/// Rows live under a single `tokio` lock; concurrent writers on the same row
/// resolve last-write-wins. Declared foreign references make physical deletes
/// fail the way a relational backend restricts them.
pub struct MemoryStore<E> {
    table: String,
    rows: RwLock<BTreeMap<EntityId, E>>,
    references: RwLock<Vec<ForeignReference>>,
}

impl<E: AuditableAggregate> MemoryStore<E> {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            rows: RwLock::new(BTreeMap::new()),
            references: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store pre-loaded with `rows`. Later duplicates replace earlier ones.
    pub fn with_rows(table: impl Into<String>, rows: impl IntoIterator<Item = E>) -> Self {
        let rows = rows.into_iter().map(|row| (row.id(), row)).collect();
        Self {
            table: table.into(),
            rows: RwLock::new(rows),
            references: RwLock::new(Vec::new()),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub async fn add_reference(&self, reference: ForeignReference) {
        self.references.write().await.push(reference);
    }

    /// Drops every reference held by `referencing_table`, as if its rows were deleted.
    pub async fn clear_references(&self, referencing_table: &str) {
        self.references
            .write()
            .await
            .retain(|r| r.referencing_table != referencing_table);
    }

    pub async fn get(&self, id: EntityId) -> Option<E> {
        self.rows.read().await.get(&id).cloned()
    }

    pub async fn contains(&self, id: EntityId) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub async fn rows(&self) -> Vec<E> {
        self.rows.read().await.values().cloned().collect()
    }

    fn missing_row(&self, id: EntityId) -> StoreError {
        StoreError::Backend(format!(
            "Row {} does not exist in table '{}'",
            id, self.table
        ))
    }

    fn reference_violation(&self, reference: &ForeignReference) -> StoreError {
        StoreError::ConstraintViolation(format!(
            "The DELETE statement conflicted with the REFERENCE constraint \"{}\". \
             The conflict occurred in database \"memory\", table \"dbo.{}\", column '{}'. \
             Row {} of table '{}' is still referenced.",
            reference.constraint,
            reference.referencing_table,
            reference.column,
            reference.target_id,
            self.table
        ))
    }
}

#[async_trait]
impl<E: AuditableAggregate> StoreAdapter<E> for MemoryStore<E> {
    async fn fetch_matching(
        &self,
        predicate: &EntitiesByIds<E>,
        cancel: &CancelSignal,
    ) -> StoreResult<Vec<E>> {
        cancel.check()?;
        let rows = self.rows.read().await;
        Ok(predicate
            .ids()
            .iter()
            .filter_map(|id| rows.get(id))
            .filter(|row| predicate.matches(row))
            .cloned()
            .collect())
    }

    async fn fetch_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>> {
        cancel.check()?;
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&entity.id()) {
            return Err(StoreError::ConstraintViolation(format!(
                "Cannot insert duplicate key {} in table '{}'",
                entity.id(),
                self.table
            )));
        }
        cancel.check()?;
        rows.insert(entity.id(), entity);
        Ok(())
    }

    async fn update_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if let Some(missing) = entities.iter().find(|e| !rows.contains_key(&e.id())) {
            return Err(self.missing_row(missing.id()));
        }
        cancel.check()?;

        let count = entities.len();
        for entity in entities {
            rows.insert(entity.id(), entity);
        }
        debug!("table '{}': updated {} row(s)", self.table, count);
        Ok(())
    }

    async fn update_one(&self, entity: E, cancel: &CancelSignal) -> StoreResult<()> {
        self.update_batch(vec![entity], cancel).await
    }

    async fn delete_batch(&self, entities: Vec<E>, cancel: &CancelSignal) -> StoreResult<()> {
        let mut rows = self.rows.write().await;
        if let Some(missing) = entities.iter().find(|e| !rows.contains_key(&e.id())) {
            return Err(self.missing_row(missing.id()));
        }

        {
            let references = self.references.read().await;
            for entity in &entities {
                if let Some(reference) = references.iter().find(|r| r.target_id == entity.id()) {
                    warn!(
                        "table '{}': delete of row {} restricted by '{}'",
                        self.table,
                        entity.id(),
                        reference.constraint
                    );
                    return Err(self.reference_violation(reference));
                }
            }
        }
        cancel.check()?;

        for entity in &entities {
            rows.remove(&entity.id());
        }
        debug!("table '{}': deleted {} row(s)", self.table, entities.len());
        Ok(())
    }
}
