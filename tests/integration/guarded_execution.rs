//! Integration tests for guarded execution and failure normalization

use super::test_utils::{context, counting_action};
use shutter::{
    ActionCategory, ActionError, ActionExecutor, ActionRegistry, ActionResult, ActionType,
    ContextRequirement, ExecuteOptions, FileLocation, MissingContextPolicy, PhotoAction,
    PhotoRef, RegistryConfig, SharedActionRegistry,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// Executor written without `#[async_trait]` that panics before it builds
/// its future.
struct PanicsOnCall;

impl ActionExecutor for PanicsOnCall {
    fn execute<'life0, 'life1, 'life2, 'async_trait>(
        &'life0 self,
        _photo: &'life1 PhotoRef,
        _options: &'life2 ExecuteOptions,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ActionResult>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        'life2: 'async_trait,
        Self: 'async_trait,
    {
        panic!("executor refused to start")
    }
}

fn panics_on_call_action() -> PhotoAction {
    PhotoAction::new(
        "eager",
        "Eager",
        "bolt",
        ActionCategory::Editing,
        ActionType::OpenWith,
        Arc::new(PanicsOnCall),
    )
}

#[tokio::test]
async fn test_unavailable_action_never_runs() {
    let mut registry = ActionRegistry::new();
    let (action, calls) = counting_action("cloud-only", ActionCategory::Export, 5);
    registry
        .register_action(action.with_requirement(ContextRequirement::file_location("cloud")))
        .unwrap();

    let result = registry
        .execute_action(
            "cloud-only",
            &PhotoRef::new("p1"),
            Some(&context(FileLocation::Local)),
        )
        .await;

    assert_eq!(
        result,
        ActionResult::failure("Action is not available in the current context")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_action_reports_id() {
    let registry = ActionRegistry::new();
    let result = registry
        .execute_action("zip", &PhotoRef::new("p1"), Some(&context(FileLocation::Local)))
        .await;
    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("Action not found: zip"));
}

#[tokio::test]
async fn test_available_action_returns_executor_result() {
    let mut registry = ActionRegistry::new();
    let (action, calls) = counting_action("echo", ActionCategory::Editing, 1);
    registry.register_action(action).unwrap();

    let result = registry
        .execute_action("echo", &PhotoRef::new("p7"), Some(&context(FileLocation::Hybrid)))
        .await;
    assert_eq!(result, ActionResult::ok_with_message("p7"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_context_policies() {
    let (action, calls) = counting_action("echo", ActionCategory::Editing, 1);
    let vetoed = action.with_enabled(|_| false);

    let mut strict = ActionRegistry::new();
    strict.register_action(vetoed.clone()).unwrap();
    let result = strict.execute_action("echo", &PhotoRef::new("p1"), None).await;
    assert_eq!(
        result.error.as_deref(),
        Some("Action requires a context to execute")
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let mut trusting = ActionRegistry::with_config(RegistryConfig {
        missing_context: MissingContextPolicy::Trust,
        ..RegistryConfig::default()
    });
    trusting.register_action(vetoed).unwrap();
    let result = trusting.execute_action("echo", &PhotoRef::new("p1"), None).await;
    assert!(result.success);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_executor_error_becomes_failed_result() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(PhotoAction::from_fn(
            "flaky",
            "Flaky",
            "warning",
            ActionCategory::Sharing,
            ActionType::Share,
            |_photo, _options| async { Err(anyhow::anyhow!("network unreachable")) },
        ))
        .unwrap();

    let result = registry
        .execute_action("flaky", &PhotoRef::new("p1"), Some(&context(FileLocation::Cloud)))
        .await;
    assert_eq!(result, ActionResult::failure("network unreachable"));
}

#[tokio::test]
async fn test_executor_panic_becomes_failed_result() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(PhotoAction::from_fn(
            "boom",
            "Boom",
            "bomb",
            ActionCategory::Editing,
            ActionType::OpenWith,
            |_photo, _options| async {
                if true {
                    panic!("executor exploded");
                }
                Ok(ActionResult::ok())
            },
        ))
        .unwrap();

    let result = registry
        .execute_action("boom", &PhotoRef::new("p1"), Some(&context(FileLocation::Local)))
        .await;
    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("Action panicked: executor exploded")
    );
}

#[tokio::test]
async fn test_panic_before_future_is_built_becomes_failed_result() {
    let mut registry = ActionRegistry::new();
    registry.register_action(panics_on_call_action()).unwrap();

    let result = registry
        .execute_action("eager", &PhotoRef::new("p1"), Some(&context(FileLocation::Local)))
        .await;
    assert_eq!(
        result,
        ActionResult::failure("Action panicked: executor refused to start")
    );

    let shared = SharedActionRegistry::new();
    shared.register_action(panics_on_call_action()).unwrap();
    let result = shared
        .execute_action("eager", &PhotoRef::new("p1"), Some(&context(FileLocation::Local)))
        .await;
    assert!(!result.success);
    assert_eq!(shared.len(), 1);
}

#[tokio::test]
async fn test_soft_failure_passes_through() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(PhotoAction::from_fn(
            "soft",
            "Soft",
            "info",
            ActionCategory::Export,
            ActionType::Export,
            |_photo, options: ExecuteOptions| async move {
                match options.export_format.as_deref() {
                    Some("png") => Ok(ActionResult::ok()),
                    other => Ok(ActionResult::failure(format!(
                        "Unsupported export format: {}",
                        other.unwrap_or("none")
                    ))),
                }
            },
        ))
        .unwrap();

    let ctx = context(FileLocation::Local);
    let photo = PhotoRef::new("p1");

    let result = registry
        .execute_action_with(
            "soft",
            &photo,
            Some(&ctx),
            &ExecuteOptions::default().with_export_format("tiff"),
        )
        .await;
    assert_eq!(result.error.as_deref(), Some("Unsupported export format: tiff"));

    let result = registry
        .execute_action_with(
            "soft",
            &photo,
            Some(&ctx),
            &ExecuteOptions::default().with_export_format("png"),
        )
        .await;
    assert!(result.is_success());
}

#[test]
fn test_empty_id_rejected() {
    let mut registry = ActionRegistry::new();
    let (action, _) = counting_action("", ActionCategory::Editing, 1);
    let err = registry.register_action(action).unwrap_err();
    assert!(matches!(err, ActionError::InvalidAction(_)));
    assert!(registry.is_empty());
}
