//! Action Registry
//!
//! In-memory, insertion-ordered store of [`PhotoAction`]s. Answers "what can I
//! do with this photo right now" (filtered, priority-sorted, optionally grouped
//! by category) and runs a chosen action behind an availability guard.
//!
//! Nothing here persists; registries are constructed explicitly by whichever
//! composition root wires up feature modules.

use crate::action::{ActionCategory, ActionExecutor, ActionResult, ExecuteOptions, PhotoAction, PhotoRef};
use crate::config::{MissingContextPolicy, RegistryConfig};
use crate::context::PhotoContext;
use crate::error::ActionError;
use futures::FutureExt;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

mod shared;

pub use shared::SharedActionRegistry;

/// Registry of photo actions keyed by id
pub struct ActionRegistry {
    actions: IndexMap<String, PhotoAction>,
    config: RegistryConfig,
}

impl ActionRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            actions: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register an action, replacing any action with the same id.
    ///
    /// A replaced action moves to the end of the tie-break order, as if it had
    /// been registered for the first time.
    pub fn register_action(&mut self, action: PhotoAction) -> Result<(), ActionError> {
        if action.id.is_empty() {
            return Err(ActionError::InvalidAction(
                "action id must be a non-empty string".to_string(),
            ));
        }

        let replaced = self.actions.shift_remove(&action.id).is_some();
        debug!(
            action_id = %action.id,
            category = %action.category,
            priority = action.priority,
            replaced,
            "Registered action"
        );
        self.actions.insert(action.id.clone(), action);
        Ok(())
    }

    /// Remove an action. Returns whether anything was removed.
    pub fn unregister_action(&mut self, id: &str) -> bool {
        let removed = self.actions.shift_remove(id).is_some();
        debug!(action_id = %id, removed, "Unregistered action");
        removed
    }

    pub fn get_action(&self, id: &str) -> Option<&PhotoAction> {
        self.actions.get(id)
    }

    /// Every registered action in insertion order, unfiltered
    pub fn get_all_actions(&self) -> Vec<&PhotoAction> {
        self.actions.values().collect()
    }

    /// Available actions, highest priority first; equal priorities keep
    /// registration order.
    pub fn get_actions_for_context(&self, context: &PhotoContext) -> Vec<&PhotoAction> {
        let mut available: Vec<&PhotoAction> = self
            .actions
            .values()
            .filter(|action| action.is_available(context))
            .collect();
        // `sort_by` is stable, so insertion order breaks ties.
        available.sort_by(|a, b| b.priority.cmp(&a.priority));

        debug!(
            registered = self.actions.len(),
            available = available.len(),
            file_location = %context.file_location,
            "Resolved actions for context"
        );
        available
    }

    /// The same list as [`ActionRegistry::get_actions_for_context`], partitioned by
    /// category. Categories without available actions are absent.
    pub fn get_actions_by_category(
        &self,
        context: &PhotoContext,
    ) -> BTreeMap<ActionCategory, Vec<&PhotoAction>> {
        let mut grouped: BTreeMap<ActionCategory, Vec<&PhotoAction>> = BTreeMap::new();
        for action in self.get_actions_for_context(context) {
            grouped.entry(action.category).or_default().push(action);
        }
        grouped
    }

    /// Whether a registered action is available under `context`. Unknown ids
    /// are never available.
    pub fn is_action_available(&self, id: &str, context: &PhotoContext) -> bool {
        self.get_action(id)
            .map(|action| action.is_available(context))
            .unwrap_or(false)
    }

    /// Run an action with default options. See
    /// [`ActionRegistry::execute_action_with`].
    pub async fn execute_action(
        &self,
        id: &str,
        photo: &PhotoRef,
        context: Option<&PhotoContext>,
    ) -> ActionResult {
        self.execute_action_with(id, photo, context, &ExecuteOptions::default())
            .await
    }

    /// Run an action behind the availability guard.
    ///
    /// The executor is never called for an unknown id, for an action that is
    /// unavailable under `context`, or (with [`MissingContextPolicy::Reject`])
    /// when no context is given. Executor errors and panics come back as a
    /// failed [`ActionResult`]; this never returns an error or unwinds.
    pub async fn execute_action_with(
        &self,
        id: &str,
        photo: &PhotoRef,
        context: Option<&PhotoContext>,
        options: &ExecuteOptions,
    ) -> ActionResult {
        let action = match self.resolve_for_execution(id, context) {
            Ok(action) => action,
            Err(err) => return err.into(),
        };
        run_executor(id, action.executor(), photo, options).await
    }

    /// Look up an action and apply the pre-execution checks.
    pub(crate) fn resolve_for_execution(
        &self,
        id: &str,
        context: Option<&PhotoContext>,
    ) -> Result<&PhotoAction, ActionError> {
        let Some(action) = self.get_action(id) else {
            warn!(action_id = %id, "Execution requested for unknown action");
            return Err(ActionError::NotFound(id.to_string()));
        };

        match (context, self.config.missing_context) {
            (Some(context), _) => {
                if !action.is_available(context) {
                    warn!(
                        action_id = %id,
                        file_location = %context.file_location,
                        "Execution rejected: action unavailable in context"
                    );
                    return Err(ActionError::Unavailable(id.to_string()));
                }
            }
            (None, MissingContextPolicy::Reject) => {
                warn!(action_id = %id, "Execution rejected: no context supplied");
                return Err(ActionError::MissingContext(id.to_string()));
            }
            (None, MissingContextPolicy::Trust) => {
                debug!(action_id = %id, "Executing without context checks");
            }
        }

        Ok(action)
    }

    /// Remove every action
    pub fn clear_actions(&mut self) {
        debug!(cleared = self.actions.len(), "Cleared actions");
        self.actions.clear();
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Await an executor and normalize every outcome into an [`ActionResult`].
pub(crate) async fn run_executor(
    id: &str,
    executor: Arc<dyn ActionExecutor>,
    photo: &PhotoRef,
    options: &ExecuteOptions,
) -> ActionResult {
    // The call itself sits inside the guarded future: a hand-written executor
    // may panic before it returns its future.
    let execution = async move { executor.execute(photo, options).await };
    let outcome = match AssertUnwindSafe(execution).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            error!(action_id = %id, reason = %reason, "Action panicked");
            return ActionError::Panicked {
                id: id.to_string(),
                reason,
            }
            .into();
        }
    };

    match outcome {
        Ok(result) => {
            info!(action_id = %id, success = result.success, "Action executed");
            result
        }
        Err(err) => {
            let reason = format!("{:#}", err);
            warn!(action_id = %id, error = %reason, "Action failed");
            ActionError::ExecutionFailed {
                id: id.to_string(),
                reason,
            }
            .into()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
