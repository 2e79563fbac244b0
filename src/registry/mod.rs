//! Startup-time wiring of the lifecycle handlers onto every qualifying entity type.
//!
//! The set of entity types is a statically known list of [`EntityDescriptor`]s,
//! usually built with [`entity_descriptors!`](crate::entity_descriptors). A type
//! qualifies by implementing [`AuditableAggregate`]; anything else does not
//! compile into a descriptor. For each descriptor the registrar resolves the
//! type's store and binds the soft-delete, hard-delete and recovery handlers.
//!
//! Registration happens once, before the mediator is frozen. Types cannot be
//! added to a built [`Mediator`].

mod descriptor;

pub use descriptor::EntityDescriptor;

use crate::config::LifecycleConfig;
use crate::core::{LifecycleError, Result};
use crate::dispatch::{Mediator, MediatorBuilder};
use crate::store::StoreProvider;
use log::{debug, info};
use std::any::TypeId;
use std::collections::HashMap;

/// Builds a `Vec<EntityDescriptor>` from a list of aggregate types.
///
/// ```
/// use entity_lifecycle::domain::{Category, Product};
/// use entity_lifecycle::entity_descriptors;
///
/// let descriptors = entity_descriptors![Product, Category];
/// assert_eq!(descriptors.len(), 2);
/// ```
#[macro_export]
macro_rules! entity_descriptors {
    ($($ty:ty),* $(,)?) => {
        vec![$($crate::registry::EntityDescriptor::of::<$ty>()),*]
    };
}

/// Outcome of a completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReport {
    /// Entity types bound, in registration order
    pub entities: Vec<&'static str>,
    /// Total command bindings in the mediator
    pub bindings: usize,
}

pub struct HandlerRegistrar<'a> {
    provider: &'a dyn StoreProvider,
    config: LifecycleConfig,
    builder: MediatorBuilder,
    bound: HashMap<&'static str, TypeId>,
    order: Vec<&'static str>,
}

impl<'a> HandlerRegistrar<'a> {
    pub fn new(provider: &'a dyn StoreProvider, config: LifecycleConfig) -> Self {
        Self::with_builder(provider, config, MediatorBuilder::new())
    }

    /// Starts from a builder that may already carry unrelated handlers.
    pub fn with_builder(
        provider: &'a dyn StoreProvider,
        config: LifecycleConfig,
        builder: MediatorBuilder,
    ) -> Self {
        Self {
            provider,
            config,
            builder,
            bound: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Binds the lifecycle handlers for every descriptor not bound yet.
    ///
    /// Repeating a descriptor, or scanning the same list again, is a no-op
    /// for types already bound. Two distinct types sharing an entity name, a
    /// type without a store, or a type whose commands the builder already
    /// carries fail the whole scan before anything from it is bound. Returns
    /// the number of newly bound entity types.
    pub fn scan(&mut self, descriptors: &[EntityDescriptor]) -> Result<usize> {
        let mut pending: Vec<&EntityDescriptor> = Vec::new();
        let mut seen = self.bound.clone();

        for descriptor in descriptors {
            match seen.get(descriptor.name()) {
                Some(type_id) if *type_id == descriptor.type_id() => {
                    debug!("entity '{}' already bound, skipping", descriptor.name());
                }
                Some(_) => {
                    return Err(LifecycleError::Registration(format!(
                        "Entity name '{}' is claimed by two different types",
                        descriptor.name()
                    )));
                }
                None => {
                    if self.provider.erased_store(descriptor.type_id()).is_none() {
                        return Err(LifecycleError::Registration(format!(
                            "No store registered for entity '{}'",
                            descriptor.name()
                        )));
                    }
                    descriptor.check(&self.builder)?;
                    seen.insert(descriptor.name(), descriptor.type_id());
                    pending.push(descriptor);
                }
            }
        }

        for descriptor in &pending {
            descriptor.bind(&mut self.builder, self.provider, &self.config)?;
            self.bound.insert(descriptor.name(), descriptor.type_id());
            self.order.push(descriptor.name());
            debug!("bound lifecycle handlers for '{}'", descriptor.name());
        }

        Ok(pending.len())
    }

    pub fn bound_entities(&self) -> &[&'static str] {
        &self.order
    }

    /// Freezes the handler table into a read-only mediator.
    pub fn finish(self) -> (Mediator, RegistrationReport) {
        let report = RegistrationReport {
            entities: self.order,
            bindings: self.builder.len(),
        };
        info!(
            "lifecycle handlers registered for {} entity type(s), {} binding(s)",
            report.entities.len(),
            report.bindings
        );
        (self.builder.build(), report)
    }
}

/// One-shot registration: scan `descriptors` and freeze the mediator.
pub fn register_lifecycle_handlers(
    provider: &dyn StoreProvider,
    config: LifecycleConfig,
    descriptors: &[EntityDescriptor],
) -> Result<(Mediator, RegistrationReport)> {
    let mut registrar = HandlerRegistrar::new(provider, config);
    registrar.scan(descriptors)?;
    Ok(registrar.finish())
}
