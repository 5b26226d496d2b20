//! Workspace config files: `<root>/config/config.toml`, then the file for the
//! active environment, `<root>/config/<SHUTTER_ENV>.toml`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_ENVIRONMENT: &str = "development";

/// Active environment name; blank values fall back to `development`.
fn environment_name(raw: Option<&str>) -> &str {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ENVIRONMENT)
}

/// Candidate files in merge order, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path, environment: Option<&str>) -> Vec<PathBuf> {
    let config_dir = workspace_root.join("config");
    let environment = environment_name(environment);
    let mut files = vec![config_dir.join("config.toml")];
    if environment != "config" {
        files.push(config_dir.join(format!("{}.toml", environment)));
    }
    files
}

/// Layer every workspace file that exists onto `builder`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let environment = std::env::var("SHUTTER_ENV").ok();
    let builder = workspace_config_files(workspace_root, environment.as_deref())
        .into_iter()
        .filter(|path| path.is_file())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), "Layering workspace configuration");
            builder.add_source(File::from(path.as_path()).required(false))
        });
    Ok(builder)
}
