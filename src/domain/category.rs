use crate::core::{EntityId, UserId};
use crate::entity::EntityRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    record: EntityRecord,
    name: String,
}

impl Category {
    pub fn new(id: EntityId, created_by: UserId, name: impl Into<String>) -> Self {
        Self {
            record: EntityRecord::new(id, created_by),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, updated_by: UserId, name: impl Into<String>) {
        self.name = name.into();
        self.record.mark_updated(updated_by);
    }
}

crate::impl_auditable_aggregate!(Category, record);
