//! Built-in Photo Actions
//!
//! The standard operations a photo client offers from its context menu: copy
//! the file path, reveal the file, open it in a helper app, download, export,
//! share, and open in a new tab. Each one is a plain [`PhotoAction`] whose side
//! effect goes through an injected [`PhotoHost`], so the same definitions work
//! on desktop hosts, in a browser shell, and in tests.

use crate::action::{
    ActionCategory, ActionResult, ActionType, ExecuteOptions, PhotoAction, PhotoRef,
};
use crate::context::{Capabilities, ContextRequirement, ExternalApp};
use crate::error::ActionError;
use crate::registry::ActionRegistry;
use anyhow::{anyhow, Context as _};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const COPY_PATH: &str = "copy-path";
pub const OPEN_LOCATION: &str = "open-location";
pub const DOWNLOAD: &str = "download";
pub const EXPORT: &str = "export";
pub const SHARE: &str = "share";
pub const OPEN_NEW_TAB: &str = "open-new-tab";
pub const OPEN_WITH_PREFIX: &str = "open-with:";

/// Host services the built-in actions delegate to
#[async_trait]
pub trait PhotoHost: Send + Sync {
    async fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()>;

    async fn reveal_in_file_manager(&self, path: &Path) -> anyhow::Result<()>;

    async fn launch_app(&self, app: &ExternalApp, path: &Path) -> anyhow::Result<()>;

    async fn download(&self, url: &str, file_name: &str) -> anyhow::Result<()>;

    /// Export the photo and return where it was written.
    async fn export(&self, photo: &PhotoRef, format: Option<&str>) -> anyhow::Result<String>;

    async fn share(&self, photo: &PhotoRef) -> anyhow::Result<()>;

    async fn open_in_new_tab(&self, url: &str) -> anyhow::Result<()>;
}

/// Id of the open-with action for a helper app
pub fn open_with_id(app_id: &str) -> String {
    format!("{}{}", OPEN_WITH_PREFIX, app_id)
}

fn local_path(photo: &PhotoRef) -> anyhow::Result<PathBuf> {
    photo
        .path
        .clone()
        .ok_or_else(|| anyhow!("Photo {} has no local path", photo.id))
}

fn remote_url(photo: &PhotoRef) -> anyhow::Result<String> {
    photo
        .url
        .clone()
        .ok_or_else(|| anyhow!("Photo {} has no URL", photo.id))
}

async fn copy_path(host: Arc<dyn PhotoHost>, photo: PhotoRef) -> anyhow::Result<ActionResult> {
    let path = local_path(&photo)?;
    host.copy_to_clipboard(&path.to_string_lossy())
        .await
        .context("Failed to copy path to clipboard")?;
    Ok(ActionResult::ok_with_message("Path copied to clipboard"))
}

async fn open_location(host: Arc<dyn PhotoHost>, photo: PhotoRef) -> anyhow::Result<ActionResult> {
    let path = local_path(&photo)?;
    host.reveal_in_file_manager(&path)
        .await
        .context("Failed to open file location")?;
    Ok(ActionResult::ok())
}

async fn open_with(
    host: Arc<dyn PhotoHost>,
    app: ExternalApp,
    photo: PhotoRef,
) -> anyhow::Result<ActionResult> {
    let path = local_path(&photo)?;
    host.launch_app(&app, &path)
        .await
        .with_context(|| format!("Failed to open with {}", app.name))?;
    Ok(ActionResult::ok_with_message(format!("Opened with {}", app.name)))
}

async fn download(host: Arc<dyn PhotoHost>, photo: PhotoRef) -> anyhow::Result<ActionResult> {
    let url = remote_url(&photo)?;
    let file_name = photo.display_name();
    host.download(&url, &file_name)
        .await
        .context("Download failed")?;
    Ok(ActionResult::ok_with_message(format!("Downloading {}", file_name)))
}

async fn export(
    host: Arc<dyn PhotoHost>,
    photo: PhotoRef,
    options: ExecuteOptions,
) -> anyhow::Result<ActionResult> {
    let destination = host
        .export(&photo, options.export_format.as_deref())
        .await
        .context("Export failed")?;
    Ok(ActionResult::ok_with_message(format!("Exported to {}", destination)))
}

async fn share(host: Arc<dyn PhotoHost>, photo: PhotoRef) -> anyhow::Result<ActionResult> {
    host.share(&photo).await.context("Share failed")?;
    Ok(ActionResult::ok())
}

async fn open_new_tab(host: Arc<dyn PhotoHost>, photo: PhotoRef) -> anyhow::Result<ActionResult> {
    let url = remote_url(&photo)?;
    host.open_in_new_tab(&url)
        .await
        .context("Failed to open new tab")?;
    Ok(ActionResult::ok())
}

pub fn copy_path_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        COPY_PATH,
        "Copy Path",
        "clipboard",
        ActionCategory::FileSystem,
        ActionType::CopyPath,
        move |photo, _options| copy_path(Arc::clone(&host), photo),
    )
    .with_requirement(ContextRequirement::file_location(["local", "hybrid"]))
    .with_priority(90)
    .with_shortcut("Ctrl+Shift+C")
    .with_description("Copy the full file path to the clipboard")
    .with_enabled(|ctx| ctx.system_info.has_clipboard)
}

pub fn open_location_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        OPEN_LOCATION,
        "Show in Folder",
        "folder-open",
        ActionCategory::FileSystem,
        ActionType::OpenLocation,
        move |photo, _options| open_location(Arc::clone(&host), photo),
    )
    .with_requirement(ContextRequirement::file_location(["local", "hybrid"]))
    .with_requirement(ContextRequirement::capability(Capabilities::CAN_OPEN_LOCATION))
    .with_priority(80)
    .with_description("Reveal the file in the system file manager")
    .with_enabled(|ctx| ctx.system_info.can_open_file_manager)
}

pub fn open_with_action(host: Arc<dyn PhotoHost>, app: ExternalApp) -> PhotoAction {
    let id = open_with_id(&app.id);
    let label = format!("Open with {}", app.name);
    let requirement = ContextRequirement::app(app.id.as_str()).includes();
    PhotoAction::from_fn(
        id,
        label,
        "external-link",
        ActionCategory::Editing,
        ActionType::OpenWith,
        move |photo, _options| open_with(Arc::clone(&host), app.clone(), photo),
    )
    .with_requirement(requirement)
    .with_requirement(ContextRequirement::file_location("cloud").excludes())
    .with_priority(70)
    .with_enabled(|ctx| ctx.system_info.can_launch_apps)
}

pub fn download_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        DOWNLOAD,
        "Download",
        "download",
        ActionCategory::Export,
        ActionType::Download,
        move |photo, _options| download(Arc::clone(&host), photo),
    )
    .with_requirement(ContextRequirement::file_location(["cloud", "hybrid"]))
    .with_priority(60)
    .with_description("Download the original file")
}

pub fn export_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        EXPORT,
        "Export",
        "file-export",
        ActionCategory::Export,
        ActionType::Export,
        move |photo, options| export(Arc::clone(&host), photo, options),
    )
    .with_requirement(ContextRequirement::capability(Capabilities::CAN_EXPORT))
    .with_priority(50)
    .with_shortcut("Ctrl+E")
}

pub fn share_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        SHARE,
        "Share",
        "share",
        ActionCategory::Sharing,
        ActionType::Share,
        move |photo, _options| share(Arc::clone(&host), photo),
    )
    .with_requirement(ContextRequirement::capability(Capabilities::CAN_SHARE))
    .with_priority(40)
}

pub fn open_new_tab_action(host: Arc<dyn PhotoHost>) -> PhotoAction {
    PhotoAction::from_fn(
        OPEN_NEW_TAB,
        "Open in New Tab",
        "tab",
        ActionCategory::Navigation,
        ActionType::OpenNewTab,
        move |photo, _options| open_new_tab(Arc::clone(&host), photo),
    )
    .with_priority(10)
    .with_enabled(|ctx| {
        ctx.system_info.supports_protocol("https") || ctx.system_info.supports_protocol("http")
    })
}

/// Every built-in action, with one open-with action per helper app.
pub fn standard_actions(host: Arc<dyn PhotoHost>, apps: &[ExternalApp]) -> Vec<PhotoAction> {
    let mut actions = vec![
        copy_path_action(Arc::clone(&host)),
        open_location_action(Arc::clone(&host)),
    ];
    actions.extend(
        apps.iter()
            .map(|app| open_with_action(Arc::clone(&host), app.clone())),
    );
    actions.extend([
        download_action(Arc::clone(&host)),
        export_action(Arc::clone(&host)),
        share_action(Arc::clone(&host)),
        open_new_tab_action(host),
    ]);
    actions
}

/// Register [`standard_actions`] into `registry`.
pub fn register_standard_actions(
    registry: &mut ActionRegistry,
    host: Arc<dyn PhotoHost>,
    apps: &[ExternalApp],
) -> Result<(), ActionError> {
    for action in standard_actions(host, apps) {
        registry.register_action(action)?;
    }
    Ok(())
}
