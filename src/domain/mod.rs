//! Aggregates managed by the lifecycle engine.

mod category;
mod product;
pub mod product_rules;

pub use category::Category;
pub use product::{PreOrderInfo, PriceTier, Product};

use crate::registry::EntityDescriptor;

/// Every aggregate in this module that is wired to the lifecycle handlers.
pub fn lifecycle_entities() -> Vec<EntityDescriptor> {
    crate::entity_descriptors![Product, Category]
}
