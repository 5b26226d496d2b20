//! Shared fixtures for integration tests

use shutter::{
    ActionCategory, ActionResult, ActionType, Capabilities, ExternalApp, FileLocation, FileType,
    PhotoAction, PhotoContext, PhotoRef, SystemInfo,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Serializes tests that touch process-wide environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
}

/// An action whose executor counts its calls and echoes the photo id
pub fn counting_action(
    id: &str,
    category: ActionCategory,
    priority: i32,
) -> (PhotoAction, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let action = PhotoAction::from_fn(
        id,
        id,
        "icon",
        category,
        ActionType::OpenWith,
        move |photo: PhotoRef, _options| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { Ok(ActionResult::ok_with_message(photo.id)) }
        },
    )
    .with_priority(priority);
    (action, calls)
}

pub fn plain_action(id: &str, category: ActionCategory, priority: i32) -> PhotoAction {
    counting_action(id, category, priority).0
}

pub fn context(location: FileLocation) -> PhotoContext {
    PhotoContext::new(location, FileType::Image)
}

/// A desktop host with every system facility turned on
pub fn desktop_context(location: FileLocation) -> PhotoContext {
    let system = SystemInfo {
        has_clipboard: true,
        can_open_file_manager: true,
        can_launch_apps: true,
        supported_protocols: vec!["https".to_string(), "file".to_string()],
        ..SystemInfo::default()
    };
    PhotoContext::new(location, FileType::Image)
        .with_capabilities(
            Capabilities::default()
                .with_flag(Capabilities::CAN_OPEN_LOCATION)
                .with_flag(Capabilities::CAN_EXPORT)
                .with_format("jpg"),
        )
        .with_app(ExternalApp::new("gimp", "GIMP", "/usr/bin/gimp"))
        .with_system_info(system)
}

pub fn ids(actions: &[&PhotoAction]) -> Vec<String> {
    actions.iter().map(|action| action.id.clone()).collect()
}
