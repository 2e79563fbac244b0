//! Adapters binding the engine operations to the dispatch boundary.

use super::LifecycleEngine;
use crate::core::{CancelSignal, Result};
use crate::dispatch::{HardDeleteCommand, RecoverCommand, RequestHandler, SoftDeleteCommand};
use crate::entity::AuditableAggregate;
use async_trait::async_trait;

pub struct SoftDeleteHandler<E: AuditableAggregate> {
    engine: LifecycleEngine<E>,
}

impl<E: AuditableAggregate> SoftDeleteHandler<E> {
    pub fn new(engine: LifecycleEngine<E>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<E: AuditableAggregate> RequestHandler<SoftDeleteCommand<E>> for SoftDeleteHandler<E> {
    async fn handle(&self, command: SoftDeleteCommand<E>, cancel: &CancelSignal) -> Result<bool> {
        self.engine
            .soft_delete(&command.ids, command.acting_user, cancel)
            .await
    }
}

pub struct HardDeleteHandler<E: AuditableAggregate> {
    engine: LifecycleEngine<E>,
}

impl<E: AuditableAggregate> HardDeleteHandler<E> {
    pub fn new(engine: LifecycleEngine<E>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<E: AuditableAggregate> RequestHandler<HardDeleteCommand<E>> for HardDeleteHandler<E> {
    async fn handle(&self, command: HardDeleteCommand<E>, cancel: &CancelSignal) -> Result<bool> {
        self.engine
            .hard_delete(&command.ids, command.acting_user, cancel)
            .await
    }
}

pub struct RecoveryHandler<E: AuditableAggregate> {
    engine: LifecycleEngine<E>,
}

impl<E: AuditableAggregate> RecoveryHandler<E> {
    pub fn new(engine: LifecycleEngine<E>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl<E: AuditableAggregate> RequestHandler<RecoverCommand<E>> for RecoveryHandler<E> {
    async fn handle(&self, command: RecoverCommand<E>, cancel: &CancelSignal) -> Result<E> {
        self.engine.recover(command.id, command.acting_user, cancel).await
    }
}
