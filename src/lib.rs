//! Shutter: Context-Aware Action Registry
//!
//! A registry of photo actions for photo management clients. Each action
//! declares the context it applies in (file location, file type, capabilities,
//! helper apps); the registry answers which actions apply to a given photo
//! context, in priority order, and runs an action only when it still applies.

pub mod action;
pub mod builtin;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod registry;

pub use action::{
    ActionCategory, ActionExecutor, ActionResult, ActionType, ExecuteOptions, PhotoAction,
    PhotoRef,
};
pub use builtin::{register_standard_actions, PhotoHost};
pub use config::{ConfigLoader, MissingContextPolicy, RegistryConfig, ShutterConfig};
pub use context::{
    Capabilities, ContextRequirement, ExternalApp, FileLocation, FileType, Operator,
    PhotoContext, RequirementType, RequirementValue, SystemInfo,
};
pub use error::ActionError;
pub use registry::{ActionRegistry, SharedActionRegistry};
