//! Declarative context requirements attached to actions.

use serde::{Deserialize, Serialize};

/// Which part of the context a requirement inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequirementType {
    /// `PhotoContext::file_location` (scalar)
    FileLocation,
    /// `PhotoContext::file_type` (scalar)
    FileType,
    /// Set capability flags and supported formats (collection)
    Capability,
    /// Ids of available helper apps (collection)
    App,
}

impl RequirementType {
    /// Scalar fields hold exactly one value; the rest are collections.
    pub fn is_scalar(&self) -> bool {
        matches!(self, RequirementType::FileLocation | RequirementType::FileType)
    }
}

/// One value or a list of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequirementValue {
    One(String),
    Many(Vec<String>),
}

impl RequirementValue {
    pub fn values(&self) -> &[String] {
        match self {
            RequirementValue::One(value) => std::slice::from_ref(value),
            RequirementValue::Many(values) => values,
        }
    }
}

impl From<&str> for RequirementValue {
    fn from(value: &str) -> Self {
        RequirementValue::One(value.to_string())
    }
}

impl From<String> for RequirementValue {
    fn from(value: String) -> Self {
        RequirementValue::One(value)
    }
}

impl From<Vec<String>> for RequirementValue {
    fn from(values: Vec<String>) -> Self {
        RequirementValue::Many(values)
    }
}

impl From<Vec<&str>> for RequirementValue {
    fn from(values: Vec<&str>) -> Self {
        RequirementValue::Many(values.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RequirementValue {
    fn from(values: [&str; N]) -> Self {
        RequirementValue::Many(values.iter().map(|v| v.to_string()).collect())
    }
}

/// How the requirement's value is compared with the context field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[default]
    Equals,
    Includes,
    Excludes,
}

/// A single declarative clause. An action is eligible only when all of its
/// clauses hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRequirement {
    #[serde(rename = "type")]
    pub requirement_type: RequirementType,
    pub value: RequirementValue,
    #[serde(default)]
    pub operator: Operator,
}

impl ContextRequirement {
    pub fn new(requirement_type: RequirementType, value: impl Into<RequirementValue>) -> Self {
        Self {
            requirement_type,
            value: value.into(),
            operator: Operator::Equals,
        }
    }

    pub fn file_location(value: impl Into<RequirementValue>) -> Self {
        Self::new(RequirementType::FileLocation, value)
    }

    pub fn file_type(value: impl Into<RequirementValue>) -> Self {
        Self::new(RequirementType::FileType, value)
    }

    pub fn capability(value: impl Into<RequirementValue>) -> Self {
        Self::new(RequirementType::Capability, value)
    }

    pub fn app(value: impl Into<RequirementValue>) -> Self {
        Self::new(RequirementType::App, value)
    }

    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn includes(self) -> Self {
        self.with_operator(Operator::Includes)
    }

    pub fn excludes(self) -> Self {
        self.with_operator(Operator::Excludes)
    }
}
