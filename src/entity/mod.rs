//! Per-row lifecycle state and the capability trait aggregates implement.

mod aggregate;
mod record;

pub use aggregate::AuditableAggregate;
pub use record::EntityRecord;
