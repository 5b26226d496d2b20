//! Thread-safe registry handle.
//!
//! Wraps an [`ActionRegistry`] in `Arc<parking_lot::RwLock<_>>` for hosts that
//! register from one thread and query or execute from others. Listing returns
//! owned clones; execution resolves the action under a read lock and releases
//! it before awaiting the executor.

use super::{run_executor, ActionRegistry};
use crate::action::{ActionCategory, ActionResult, ExecuteOptions, PhotoAction, PhotoRef};
use crate::config::RegistryConfig;
use crate::context::PhotoContext;
use crate::error::ActionError;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SharedActionRegistry {
    inner: Arc<RwLock<ActionRegistry>>,
}

impl SharedActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self::from_registry(ActionRegistry::with_config(config))
    }

    pub fn from_registry(registry: ActionRegistry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn register_action(&self, action: PhotoAction) -> Result<(), ActionError> {
        self.inner.write().register_action(action)
    }

    pub fn unregister_action(&self, id: &str) -> bool {
        self.inner.write().unregister_action(id)
    }

    pub fn get_action(&self, id: &str) -> Option<PhotoAction> {
        self.inner.read().get_action(id).cloned()
    }

    pub fn get_all_actions(&self) -> Vec<PhotoAction> {
        self.inner
            .read()
            .get_all_actions()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_actions_for_context(&self, context: &PhotoContext) -> Vec<PhotoAction> {
        self.inner
            .read()
            .get_actions_for_context(context)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_actions_by_category(
        &self,
        context: &PhotoContext,
    ) -> BTreeMap<ActionCategory, Vec<PhotoAction>> {
        self.inner
            .read()
            .get_actions_by_category(context)
            .into_iter()
            .map(|(category, actions)| (category, actions.into_iter().cloned().collect()))
            .collect()
    }

    pub fn is_action_available(&self, id: &str, context: &PhotoContext) -> bool {
        self.inner.read().is_action_available(id, context)
    }

    pub async fn execute_action(
        &self,
        id: &str,
        photo: &PhotoRef,
        context: Option<&PhotoContext>,
    ) -> ActionResult {
        self.execute_action_with(id, photo, context, &ExecuteOptions::default())
            .await
    }

    pub async fn execute_action_with(
        &self,
        id: &str,
        photo: &PhotoRef,
        context: Option<&PhotoContext>,
        options: &ExecuteOptions,
    ) -> ActionResult {
        let executor = {
            let registry = self.inner.read();
            match registry.resolve_for_execution(id, context) {
                Ok(action) => action.executor(),
                Err(err) => return err.into(),
            }
        };
        run_executor(id, executor, photo, options).await
    }

    pub fn clear_actions(&self) {
        self.inner.write().clear_actions();
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Borrow the underlying registry for several reads under one lock.
    pub fn read(&self) -> RwLockReadGuard<'_, ActionRegistry> {
        self.inner.read()
    }

    /// Borrow the underlying registry for a batch of registrations.
    pub fn write(&self) -> RwLockWriteGuard<'_, ActionRegistry> {
        self.inner.write()
    }
}
