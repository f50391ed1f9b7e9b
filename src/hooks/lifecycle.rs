//! Lifecycle observer adapters
//!
//! Action-completed, batch-completed, and initialize-migration hooks are
//! terminal observers: not content-typed, synchronous, fanned out to
//! every registration independently and in registration order.

use super::traits::{
    ActionCompletedHook, BatchCompletedHook, HookResult, InitializeMigrationHook,
};
use crate::engine::{ActionResult, BatchSummary, MigrationStartInfo};
use crate::extensions::{ActionCompleted, BatchCompleted, InitializeMigration, ObserverFn};
use crate::services::ScopedServices;

enum ActionSource {
    Instance(Box<dyn ActionCompleted>),
    Callback(ObserverFn<ActionResult>),
}

pub struct ActionCompletedAdapter {
    source: ActionSource,
    services: ScopedServices,
}

impl ActionCompletedAdapter {
    pub(crate) fn from_instance(
        extension: impl ActionCompleted + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: ActionSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(
        callback: ObserverFn<ActionResult>,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: ActionSource::Callback(callback),
            services,
        }
    }
}

impl ActionCompletedHook for ActionCompletedAdapter {
    fn execute(&self, result: &ActionResult) -> HookResult<()> {
        match &self.source {
            ActionSource::Instance(hook) => hook.on_action_completed(result),
            ActionSource::Callback(callback) => callback(result, &self.services),
        }
    }
}

enum BatchSource {
    Instance(Box<dyn BatchCompleted>),
    Callback(ObserverFn<BatchSummary>),
}

pub struct BatchCompletedAdapter {
    source: BatchSource,
    services: ScopedServices,
}

impl BatchCompletedAdapter {
    pub(crate) fn from_instance(
        extension: impl BatchCompleted + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: BatchSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(
        callback: ObserverFn<BatchSummary>,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: BatchSource::Callback(callback),
            services,
        }
    }
}

impl BatchCompletedHook for BatchCompletedAdapter {
    fn execute(&self, summary: &BatchSummary) -> HookResult<()> {
        match &self.source {
            BatchSource::Instance(hook) => hook.on_batch_completed(summary),
            BatchSource::Callback(callback) => callback(summary, &self.services),
        }
    }
}

enum InitializeSource {
    Instance(Box<dyn InitializeMigration>),
    Callback(ObserverFn<MigrationStartInfo>),
}

pub struct InitializeMigrationAdapter {
    source: InitializeSource,
    services: ScopedServices,
}

impl InitializeMigrationAdapter {
    pub(crate) fn from_instance(
        extension: impl InitializeMigration + 'static,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: InitializeSource::Instance(Box::new(extension)),
            services,
        }
    }

    pub(crate) fn from_callback(
        callback: ObserverFn<MigrationStartInfo>,
        services: ScopedServices,
    ) -> Self {
        Self {
            source: InitializeSource::Callback(callback),
            services,
        }
    }
}

impl InitializeMigrationHook for InitializeMigrationAdapter {
    fn execute(&self, info: &MigrationStartInfo) -> HookResult<()> {
        match &self.source {
            InitializeSource::Instance(hook) => hook.on_migration_start(info),
            InitializeSource::Callback(callback) => callback(info, &self.services),
        }
    }
}
