//! Photo Action Model
//!
//! A [`PhotoAction`] describes one user-invokable operation: display metadata,
//! the declarative requirements that decide where it applies, its priority, an
//! imperative `is_enabled` veto and the executor that performs the effect.
//! Actions are plain values; the registry owns matching, ordering and guarded
//! execution.

use crate::context::{is_declaratively_eligible, ContextRequirement, PhotoContext};
use crate::error::ActionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Menu grouping. Never consulted during matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCategory {
    FileSystem,
    Editing,
    Sharing,
    Export,
    Navigation,
}

impl ActionCategory {
    pub const ALL: [ActionCategory; 5] = [
        ActionCategory::FileSystem,
        ActionCategory::Editing,
        ActionCategory::Sharing,
        ActionCategory::Export,
        ActionCategory::Navigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::FileSystem => "FILE_SYSTEM",
            ActionCategory::Editing => "EDITING",
            ActionCategory::Sharing => "SHARING",
            ActionCategory::Export => "EXPORT",
            ActionCategory::Navigation => "NAVIGATION",
        }
    }
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nature of the operation, for executors and analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionType {
    CopyPath,
    OpenLocation,
    OpenWith,
    Download,
    Export,
    Share,
    OpenNewTab,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CopyPath => "copy-path",
            ActionType::OpenLocation => "open-location",
            ActionType::OpenWith => "open-with",
            ActionType::Download => "download",
            ActionType::Export => "export",
            ActionType::Share => "share",
            ActionType::OpenNewTab => "open-new-tab",
        }
    }
}

/// Opaque handle for the photo an action runs against. The registry passes it
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl PhotoRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Best human-readable name: explicit file name, then the path's file
    /// name, then the id.
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.file_name {
            return name.clone();
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// Per-invocation parameters handed to the executor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteOptions {
    /// Helper app to open the photo with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    /// Target format for exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_format: Option<String>,
    /// Free-form parameters for custom executors
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ExecuteOptions {
    pub fn with_app(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    pub fn with_export_format(mut self, format: impl Into<String>) -> Self {
        self.export_format = Some(format.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Uniform outcome of attempting to run an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            error: None,
        }
    }

    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl From<ActionError> for ActionResult {
    fn from(err: ActionError) -> Self {
        ActionResult::failure(err.to_string())
    }
}

/// The effect behind an action.
///
/// Implementations may fail; the registry turns errors (and panics) into a
/// failed [`ActionResult`].
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(
        &self,
        photo: &PhotoRef,
        options: &ExecuteOptions,
    ) -> anyhow::Result<ActionResult>;
}

/// Adapter letting an async closure act as an [`ActionExecutor`].
pub struct FnExecutor<F>(F);

impl<F, Fut> FnExecutor<F>
where
    F: Fn(PhotoRef, ExecuteOptions) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<ActionResult>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> ActionExecutor for FnExecutor<F>
where
    F: Fn(PhotoRef, ExecuteOptions) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<ActionResult>> + Send + 'static,
{
    async fn execute(
        &self,
        photo: &PhotoRef,
        options: &ExecuteOptions,
    ) -> anyhow::Result<ActionResult> {
        (self.0)(photo.clone(), options.clone()).await
    }
}

/// Imperative availability check, recomputed on every query
pub type EnabledPredicate = Arc<dyn Fn(&PhotoContext) -> bool + Send + Sync>;

/// Descriptor of one user-invokable operation
#[derive(Clone)]
pub struct PhotoAction {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub category: ActionCategory,
    pub action_type: ActionType,
    pub context_requirements: Vec<ContextRequirement>,
    /// Higher sorts first
    pub priority: i32,
    pub shortcut: Option<String>,
    pub description: Option<String>,
    is_enabled: EnabledPredicate,
    executor: Arc<dyn ActionExecutor>,
}

impl PhotoAction {
    /// Create an action with no requirements, priority 0, and an `is_enabled`
    /// predicate that always approves.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        category: ActionCategory,
        action_type: ActionType,
        executor: Arc<dyn ActionExecutor>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            category,
            action_type,
            context_requirements: Vec::new(),
            priority: 0,
            shortcut: None,
            description: None,
            is_enabled: Arc::new(|_| true),
            executor,
        }
    }

    /// Like [`PhotoAction::new`] with an async closure as the executor.
    pub fn from_fn<F, Fut>(
        id: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        category: ActionCategory,
        action_type: ActionType,
        execute: F,
    ) -> Self
    where
        F: Fn(PhotoRef, ExecuteOptions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<ActionResult>> + Send + 'static,
    {
        Self::new(
            id,
            label,
            icon,
            category,
            action_type,
            Arc::new(FnExecutor::new(execute)),
        )
    }

    pub fn with_requirement(mut self, requirement: ContextRequirement) -> Self {
        self.context_requirements.push(requirement);
        self
    }

    pub fn with_requirements<I>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = ContextRequirement>,
    {
        self.context_requirements.extend(requirements);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the `is_enabled` predicate. It must be pure.
    pub fn with_enabled<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&PhotoContext) -> bool + Send + Sync + 'static,
    {
        self.is_enabled = Arc::new(predicate);
        self
    }

    pub fn is_enabled(&self, context: &PhotoContext) -> bool {
        (self.is_enabled)(context)
    }

    pub fn is_declaratively_eligible(&self, context: &PhotoContext) -> bool {
        is_declaratively_eligible(&self.context_requirements, context)
    }

    /// Declarative eligibility and `is_enabled`, both true.
    pub fn is_available(&self, context: &PhotoContext) -> bool {
        self.is_declaratively_eligible(context) && self.is_enabled(context)
    }

    pub fn executor(&self) -> Arc<dyn ActionExecutor> {
        Arc::clone(&self.executor)
    }

    /// Run the executor directly, bypassing every registry guard.
    pub async fn execute(
        &self,
        photo: &PhotoRef,
        options: &ExecuteOptions,
    ) -> anyhow::Result<ActionResult> {
        self.executor.execute(photo, options).await
    }
}

impl fmt::Debug for PhotoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoAction")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("category", &self.category)
            .field("action_type", &self.action_type)
            .field("context_requirements", &self.context_requirements)
            .field("priority", &self.priority)
            .field("shortcut", &self.shortcut)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
