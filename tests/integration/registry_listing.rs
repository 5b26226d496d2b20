//! Integration tests for listing and grouping actions by context

use super::test_utils::{context, ids, plain_action};
use shutter::{
    ActionCategory, ActionRegistry, Capabilities, ContextRequirement, FileLocation, PhotoContext,
};

#[test]
fn test_local_and_cloud_offerings() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(
            plain_action("A", ActionCategory::FileSystem, 10)
                .with_requirement(ContextRequirement::file_location("local")),
        )
        .unwrap();
    registry
        .register_action(
            plain_action("B", ActionCategory::Export, 5)
                .with_requirement(ContextRequirement::file_location("cloud")),
        )
        .unwrap();
    registry
        .register_action(plain_action("C", ActionCategory::Navigation, 7))
        .unwrap();

    let local = registry.get_actions_for_context(&context(FileLocation::Local));
    assert_eq!(ids(&local), vec!["A", "C"]);

    let cloud = registry.get_actions_for_context(&context(FileLocation::Cloud));
    assert_eq!(ids(&cloud), vec!["C", "B"]);
}

#[test]
fn test_equal_priorities_keep_registration_order() {
    let mut registry = ActionRegistry::new();
    for id in ["first", "second", "third"] {
        registry
            .register_action(plain_action(id, ActionCategory::Editing, 3))
            .unwrap();
    }
    registry
        .register_action(plain_action("top", ActionCategory::Editing, 4))
        .unwrap();

    let listed = registry.get_actions_for_context(&PhotoContext::default());
    assert_eq!(ids(&listed), vec!["top", "first", "second", "third"]);
}

#[test]
fn test_grouping_partitions_the_flat_list() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(plain_action("copy", ActionCategory::FileSystem, 9))
        .unwrap();
    registry
        .register_action(plain_action("reveal", ActionCategory::FileSystem, 8))
        .unwrap();
    registry
        .register_action(plain_action("tab", ActionCategory::Navigation, 1))
        .unwrap();
    registry
        .register_action(
            plain_action("share", ActionCategory::Sharing, 5)
                .with_requirement(ContextRequirement::capability(Capabilities::CAN_SHARE)),
        )
        .unwrap();

    let ctx = PhotoContext::default();
    let grouped = registry.get_actions_by_category(&ctx);

    assert_eq!(grouped.len(), 2);
    assert_eq!(ids(&grouped[&ActionCategory::FileSystem]), vec!["copy", "reveal"]);
    assert_eq!(ids(&grouped[&ActionCategory::Navigation]), vec!["tab"]);
    assert!(!grouped.contains_key(&ActionCategory::Sharing));

    let total: usize = grouped.values().map(Vec::len).sum();
    assert_eq!(total, registry.get_actions_for_context(&ctx).len());
}

#[test]
fn test_is_enabled_vetoes_eligible_action() {
    let mut registry = ActionRegistry::new();
    registry
        .register_action(
            plain_action("D", ActionCategory::Editing, 1).with_enabled(|ctx| {
                ctx.capabilities.can_edit
            }),
        )
        .unwrap();

    let plain = PhotoContext::default();
    assert!(registry.get_actions_for_context(&plain).is_empty());
    assert!(!registry.is_action_available("D", &plain));

    let editable = PhotoContext::default()
        .with_capabilities(Capabilities::default().with_flag(Capabilities::CAN_EDIT));
    assert!(registry.is_action_available("D", &editable));
}

#[test]
fn test_registry_lifecycle() {
    let mut registry = ActionRegistry::new();
    assert!(registry.is_empty());

    registry
        .register_action(plain_action("x", ActionCategory::Editing, 1))
        .unwrap();
    registry
        .register_action(plain_action("y", ActionCategory::Editing, 1))
        .unwrap();
    assert_eq!(registry.len(), 2);

    assert!(registry.unregister_action("x"));
    assert!(!registry.unregister_action("x"));
    assert!(registry.get_action("x").is_none());
    assert!(!registry.is_action_available("x", &PhotoContext::default()));

    registry.clear_actions();
    assert!(registry.get_all_actions().is_empty());
}

#[test]
fn test_requirements_from_json() {
    let requirements: Vec<ContextRequirement> = serde_json::from_str(
        r#"[
            {"type": "fileLocation", "value": ["local", "hybrid"], "operator": "includes"},
            {"type": "capability", "value": "canExport"}
        ]"#,
    )
    .unwrap();

    let mut registry = ActionRegistry::new();
    registry
        .register_action(
            plain_action("export", ActionCategory::Export, 1).with_requirements(requirements),
        )
        .unwrap();

    let hybrid = context(FileLocation::Hybrid)
        .with_capabilities(Capabilities::default().with_flag(Capabilities::CAN_EXPORT));
    assert!(registry.is_action_available("export", &hybrid));

    let cloud = context(FileLocation::Cloud)
        .with_capabilities(Capabilities::default().with_flag(Capabilities::CAN_EXPORT));
    assert!(!registry.is_action_available("export", &cloud));
}
