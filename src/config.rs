//! Configuration System
//!
//! Layered configuration for hosts embedding the registry: built-in defaults,
//! the user's global file, workspace files, then `SHUTTER__*` environment
//! variables. Registries built with [`ActionRegistry::new`] use the defaults
//! and never touch the filesystem.
//!
//! [`ActionRegistry::new`]: crate::registry::ActionRegistry::new

use crate::error::ActionError;
use crate::logging::LoggingConfig;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

/// What `execute_action` does when the caller omits the context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingContextPolicy {
    /// Refuse to run; the executor is never called
    #[default]
    Reject,
    /// Run the executor with no checks at all.
    ///
    /// Neither the declarative requirements nor the `is_enabled` veto are
    /// consulted, so an action that would be unavailable in every context
    /// still runs. Only for hosts that filtered the action list themselves.
    Trust,
}

/// Registry behavior settings.
///
/// Executor panics are always converted into failed results; no setting
/// turns that off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub missing_context: MissingContextPolicy,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShutterConfig {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShutterConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ActionError> {
        self.logging.validate().map_err(ActionError::Config)
    }
}

/// Loads [`ShutterConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{SHUTTER_ENV}.toml`, environment.
    pub fn load(workspace_root: &Path) -> Result<ShutterConfig, ActionError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = builder.add_source(environment());

        let config: ShutterConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file plus the environment
    pub fn load_from_file(path: &Path) -> Result<ShutterConfig, ActionError> {
        let config: ShutterConfig = merge::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the user's global config file, if a home can be determined
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }

    /// Defaults only
    pub fn default() -> ShutterConfig {
        ShutterConfig::default()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SHUTTER")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
fn defaults_only() -> Result<ShutterConfig, ActionError> {
    let config: ShutterConfig = merge::builder_with_defaults()?.build()?.try_deserialize()?;
    Ok(config)
}
