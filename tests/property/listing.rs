//! Listing properties: subset, ordering, stability and partitioning

use proptest::prelude::*;
use shutter::{
    ActionCategory, ActionRegistry, ActionResult, ActionType, ContextRequirement, FileLocation,
    FileType, PhotoAction, PhotoContext,
};
use std::collections::HashMap;

const LOCATIONS: [FileLocation; 3] = [FileLocation::Local, FileLocation::Cloud, FileLocation::Hybrid];

/// (priority, category index, required location index or none, vetoed)
type ActionSpec = (i8, usize, Option<usize>, bool);

fn action_spec() -> impl Strategy<Value = ActionSpec> {
    (
        any::<i8>(),
        0..ActionCategory::ALL.len(),
        proptest::option::of(0..LOCATIONS.len()),
        any::<bool>(),
    )
}

fn build_registry(specs: &[ActionSpec]) -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    for (index, (priority, category, location, vetoed)) in specs.iter().enumerate() {
        let vetoed = *vetoed;
        let mut action = PhotoAction::from_fn(
            format!("action-{}", index),
            "Action",
            "icon",
            ActionCategory::ALL[*category],
            ActionType::OpenNewTab,
            |_photo, _options| async { Ok(ActionResult::ok()) },
        )
        .with_priority(i32::from(*priority))
        .with_enabled(move |_| !vetoed);
        if let Some(location) = location {
            action = action.with_requirement(ContextRequirement::file_location(
                LOCATIONS[*location].as_str(),
            ));
        }
        registry.register_action(action).unwrap();
    }
    registry
}

/// Listed actions are exactly the available ones, sorted by priority with
/// registration order breaking ties.
#[test]
fn test_listing_is_sorted_available_subset() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(proptest::collection::vec(action_spec(), 0..24), 0..LOCATIONS.len()),
            |(specs, location)| {
                let registry = build_registry(&specs);
                let context = PhotoContext::new(LOCATIONS[location], FileType::Image);
                let listed = registry.get_actions_for_context(&context);

                let all = registry.get_all_actions();
                let expected_count = all.iter().filter(|a| a.is_available(&context)).count();
                prop_assert_eq!(listed.len(), expected_count);
                prop_assert!(listed.iter().all(|a| a.is_available(&context)));

                let position: HashMap<&str, usize> = all
                    .iter()
                    .enumerate()
                    .map(|(i, a)| (a.id.as_str(), i))
                    .collect();
                for pair in listed.windows(2) {
                    prop_assert!(pair[0].priority >= pair[1].priority);
                    if pair[0].priority == pair[1].priority {
                        prop_assert!(position[pair[0].id.as_str()] < position[pair[1].id.as_str()]);
                    }
                }

                Ok(())
            },
        )
        .unwrap();
}

/// Grouping is a partition of the flat list that preserves its order.
#[test]
fn test_grouping_partitions_listing() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(proptest::collection::vec(action_spec(), 0..24), 0..LOCATIONS.len()),
            |(specs, location)| {
                let registry = build_registry(&specs);
                let context = PhotoContext::new(LOCATIONS[location], FileType::Image);
                let listed = registry.get_actions_for_context(&context);
                let grouped = registry.get_actions_by_category(&context);

                for (category, actions) in &grouped {
                    prop_assert!(!actions.is_empty());
                    let expected: Vec<&str> = listed
                        .iter()
                        .filter(|a| a.category == *category)
                        .map(|a| a.id.as_str())
                        .collect();
                    let actual: Vec<&str> = actions.iter().map(|a| a.id.as_str()).collect();
                    prop_assert_eq!(actual, expected);
                }

                let total: usize = grouped.values().map(Vec::len).sum();
                prop_assert_eq!(total, listed.len());

                Ok(())
            },
        )
        .unwrap();
}

/// Listing twice with the same context yields the same sequence.
#[test]
fn test_listing_is_deterministic() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(action_spec(), 0..24),
            |specs| {
                let registry = build_registry(&specs);
                let context = PhotoContext::new(FileLocation::Hybrid, FileType::Raw);
                let first: Vec<String> = registry
                    .get_actions_for_context(&context)
                    .iter()
                    .map(|a| a.id.clone())
                    .collect();
                let second: Vec<String> = registry
                    .get_actions_for_context(&context)
                    .iter()
                    .map(|a| a.id.clone())
                    .collect();
                prop_assert_eq!(first, second);
                Ok(())
            },
        )
        .unwrap();
}
