//! Mediator-style boundary: a command value goes in, is routed by its static
//! type to exactly one registered handler, and the handler's typed result
//! comes back.

mod commands;
mod mediator;

pub use commands::{HardDeleteCommand, RecoverCommand, SoftDeleteCommand};
pub use mediator::{Mediator, MediatorBuilder};

use crate::core::{CancelSignal, Result};
use async_trait::async_trait;

/// A request routed by its concrete type.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

#[async_trait]
pub trait RequestHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C, cancel: &CancelSignal) -> Result<C::Output>;
}
