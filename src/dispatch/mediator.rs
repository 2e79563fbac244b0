use super::{Command, RequestHandler};
use crate::core::{CancelSignal, LifecycleError, Result};
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{Instrument, info_span};
use uuid::Uuid;

type ErasedHandler = Arc<dyn Any + Send + Sync>;

/// Mutable handler table, only alive during startup.
#[derive(Default)]
pub struct MediatorBuilder {
    handlers: HashMap<TypeId, (&'static str, ErasedHandler)>,
}

impl MediatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `handler` to command type `C`.
    ///
    /// A command type is bound at most once; a second binding is an error
    /// rather than a silent overwrite.
    pub fn register<C: Command>(&mut self, handler: Arc<dyn RequestHandler<C>>) -> Result<()> {
        let key = TypeId::of::<C>();
        if self.handlers.contains_key(&key) {
            return Err(LifecycleError::Registration(format!(
                "Handler for '{}' is already registered",
                type_name::<C>()
            )));
        }
        self.handlers
            .insert(key, (type_name::<C>(), Arc::new(handler) as ErasedHandler));
        Ok(())
    }

    pub fn is_bound<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Freezes the table. The resulting mediator is read-only.
    pub fn build(self) -> Mediator {
        Mediator {
            handlers: Arc::new(self.handlers),
        }
    }
}

/// Routes commands to their handler by static type.
///
/// Cheap to clone and safe to share across tasks; the handler table never
/// changes after [`MediatorBuilder::build`].
#[derive(Clone, Default)]
pub struct Mediator {
    handlers: Arc<HashMap<TypeId, (&'static str, ErasedHandler)>>,
}

impl Mediator {
    pub async fn send<C: Command>(&self, command: C, cancel: &CancelSignal) -> Result<C::Output> {
        let handler = self.handler::<C>()?;
        let request_id = Uuid::new_v4();
        let span = info_span!("mediator.send", command = type_name::<C>(), %request_id);
        handler.handle(command, cancel).instrument(span).await
    }

    fn handler<C: Command>(&self) -> Result<Arc<dyn RequestHandler<C>>> {
        self.handlers
            .get(&TypeId::of::<C>())
            .and_then(|(_, erased)| {
                Arc::clone(erased)
                    .downcast::<Arc<dyn RequestHandler<C>>>()
                    .ok()
            })
            .map(|handler| Arc::clone(&*handler))
            .ok_or(LifecycleError::HandlerNotRegistered(type_name::<C>()))
    }

    pub fn is_bound<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    pub fn binding_count(&self) -> usize {
        self.handlers.len()
    }

    /// Names of every bound command type, sorted.
    pub fn bindings(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Mediator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mediator")
            .field("bindings", &self.bindings())
            .finish()
    }
}
