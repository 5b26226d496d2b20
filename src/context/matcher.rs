//! Requirement evaluation.
//!
//! A total, side-effect-free evaluator: each [`RequirementType`] reads exactly
//! one known field of [`PhotoContext`].
//!
//! Scalar fields (`fileLocation`, `fileType`) behave like one-element
//! collections for `includes`/`excludes`. For `equals`, a scalar must equal the
//! single value or one of the listed values. A collection compared with
//! `equals` must contain a single value, or match a list value as a set.
//! Format entries compare case-insensitively and ignore a leading dot.

use super::requirement::{ContextRequirement, Operator, RequirementType, RequirementValue};
use super::{normalize_format, PhotoContext};
use std::collections::BTreeSet;

/// Evaluate one requirement against a context.
pub fn matches(requirement: &ContextRequirement, context: &PhotoContext) -> bool {
    let kind = requirement.requirement_type;
    match requirement.operator {
        Operator::Equals => equals(kind, &requirement.value, context),
        Operator::Includes => includes_any(kind, requirement.value.values(), context),
        Operator::Excludes => !includes_any(kind, requirement.value.values(), context),
    }
}

/// AND of every requirement. An empty list is always eligible.
pub fn is_declaratively_eligible(requirements: &[ContextRequirement], context: &PhotoContext) -> bool {
    requirements.iter().all(|requirement| matches(requirement, context))
}

fn equals(kind: RequirementType, value: &RequirementValue, context: &PhotoContext) -> bool {
    if kind.is_scalar() {
        return includes_any(kind, value.values(), context);
    }
    match value {
        RequirementValue::One(single) => contains(kind, single, context),
        RequirementValue::Many(values) => {
            let expected: BTreeSet<String> = values
                .iter()
                .map(|v| canonical_value(kind, v, context))
                .collect();
            collection_entries(kind, context) == expected
        }
    }
}

fn includes_any(kind: RequirementType, values: &[String], context: &PhotoContext) -> bool {
    values.iter().any(|value| contains(kind, value, context))
}

fn contains(kind: RequirementType, value: &str, context: &PhotoContext) -> bool {
    match kind {
        RequirementType::FileLocation => context.file_location.as_str() == value,
        RequirementType::FileType => context.file_type.as_str() == value,
        RequirementType::Capability => {
            context.capabilities.flag(value) || context.capabilities.supports_format(value)
        }
        RequirementType::App => context.available_apps.iter().any(|app| app.id == value),
    }
}

fn canonical_value(kind: RequirementType, value: &str, context: &PhotoContext) -> String {
    match kind {
        RequirementType::Capability if !context.capabilities.is_flag_name(value) => {
            normalize_format(value)
        }
        _ => value.to_string(),
    }
}

fn collection_entries(kind: RequirementType, context: &PhotoContext) -> BTreeSet<String> {
    match kind {
        RequirementType::FileLocation => BTreeSet::from([context.file_location.as_str().to_string()]),
        RequirementType::FileType => BTreeSet::from([context.file_type.as_str().to_string()]),
        RequirementType::Capability => {
            let caps = &context.capabilities;
            caps.enabled_flags()
                .into_iter()
                .map(str::to_string)
                .chain(caps.supported_formats.iter().map(|f| normalize_format(f)))
                .collect()
        }
        RequirementType::App => context
            .available_apps
            .iter()
            .map(|app| app.id.clone())
            .collect(),
    }
}
