//! Photo Context Model
//!
//! Runtime facts about a photo and its environment: where the file lives, what
//! kind of file it is, which capabilities and helper applications are present,
//! and what the host platform supports. A [`PhotoContext`] is a read-only
//! snapshot built fresh by the caller for every decision; nothing in this crate
//! mutates one.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod matcher;
pub mod requirement;

pub use matcher::{is_declaratively_eligible, matches};
pub use requirement::{ContextRequirement, Operator, RequirementType, RequirementValue};

/// Where the photo's bytes live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileLocation {
    /// Stored on the local filesystem only
    #[default]
    Local,
    /// Stored remotely only
    Cloud,
    /// Synced: a local copy backed by a remote one
    Hybrid,
}

impl FileLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileLocation::Local => "local",
            FileLocation::Cloud => "cloud",
            FileLocation::Hybrid => "hybrid",
        }
    }

    /// True when a local file path is expected to exist.
    pub fn has_local_copy(&self) -> bool {
        matches!(self, FileLocation::Local | FileLocation::Hybrid)
    }
}

impl fmt::Display for FileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of media the photo handle points at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    #[default]
    Image,
    Video,
    Raw,
    Document,
    /// Any type the client does not model explicitly
    #[serde(untagged)]
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Raw => "raw",
            FileType::Document => "document",
            FileType::Other(name) => name,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named capability flags plus the formats the environment can handle.
///
/// Well-known flags are fields; anything else lands in `extra` so feature
/// modules can introduce new flags without touching this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    #[serde(default)]
    pub can_edit: bool,
    #[serde(default)]
    pub can_export: bool,
    #[serde(default)]
    pub can_share: bool,
    #[serde(default)]
    pub can_open_location: bool,
    #[serde(default)]
    pub can_copy_path: bool,
    #[serde(default)]
    pub can_open_with: bool,
    /// File formats (extensions) the environment can read or produce
    #[serde(default)]
    pub supported_formats: Vec<String>,
    /// Additional named flags. Unknown keys whose value is not a boolean
    /// are dropped on deserialization.
    #[serde(flatten, deserialize_with = "boolean_entries")]
    pub extra: BTreeMap<String, bool>,
}

fn boolean_entries<'de, D>(deserializer: D) -> Result<BTreeMap<String, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| value.as_bool().map(|flag| (name, flag)))
        .collect())
}

impl Capabilities {
    pub const CAN_EDIT: &'static str = "canEdit";
    pub const CAN_EXPORT: &'static str = "canExport";
    pub const CAN_SHARE: &'static str = "canShare";
    pub const CAN_OPEN_LOCATION: &'static str = "canOpenLocation";
    pub const CAN_COPY_PATH: &'static str = "canCopyPath";
    pub const CAN_OPEN_WITH: &'static str = "canOpenWith";

    const KNOWN: [&'static str; 6] = [
        Self::CAN_EDIT,
        Self::CAN_EXPORT,
        Self::CAN_SHARE,
        Self::CAN_OPEN_LOCATION,
        Self::CAN_COPY_PATH,
        Self::CAN_OPEN_WITH,
    ];

    /// Returns true if `name` is a well-known flag or an extra flag key.
    pub fn is_flag_name(&self, name: &str) -> bool {
        Self::KNOWN.contains(&name) || self.extra.contains_key(name)
    }

    /// Value of a named flag; unknown names are false.
    pub fn flag(&self, name: &str) -> bool {
        match name {
            Self::CAN_EDIT => self.can_edit,
            Self::CAN_EXPORT => self.can_export,
            Self::CAN_SHARE => self.can_share,
            Self::CAN_OPEN_LOCATION => self.can_open_location,
            Self::CAN_COPY_PATH => self.can_copy_path,
            Self::CAN_OPEN_WITH => self.can_open_with,
            other => self.extra.get(other).copied().unwrap_or(false),
        }
    }

    /// Set a named flag, routing well-known names to their field.
    pub fn set_flag(&mut self, name: &str, value: bool) {
        match name {
            Self::CAN_EDIT => self.can_edit = value,
            Self::CAN_EXPORT => self.can_export = value,
            Self::CAN_SHARE => self.can_share = value,
            Self::CAN_OPEN_LOCATION => self.can_open_location = value,
            Self::CAN_COPY_PATH => self.can_copy_path = value,
            Self::CAN_OPEN_WITH => self.can_open_with = value,
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }

    /// Builder form of [`Capabilities::set_flag`] with `value = true`.
    pub fn with_flag(mut self, name: &str) -> Self {
        self.set_flag(name, true);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.supported_formats.push(format.into());
        self
    }

    /// Names of every flag that is currently set.
    pub fn enabled_flags(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Self::KNOWN
            .iter()
            .copied()
            .filter(|name| self.flag(name))
            .collect();
        names.extend(
            self.extra
                .iter()
                .filter(|(name, enabled)| **enabled && !Self::KNOWN.contains(&name.as_str()))
                .map(|(name, _)| name.as_str()),
        );
        names
    }

    pub fn supports_format(&self, format: &str) -> bool {
        let wanted = normalize_format(format);
        self.supported_formats
            .iter()
            .any(|f| normalize_format(f) == wanted)
    }
}

/// Canonical form of a file format: lowercase, no leading dot.
pub fn normalize_format(format: &str) -> String {
    format.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Broad grouping of helper applications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppCategory {
    ImageEditor,
    Viewer,
    RawProcessor,
    VideoEditor,
    #[default]
    Other,
}

/// A helper application the host can launch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalApp {
    pub id: String,
    pub name: String,
    /// Executable path, bundle id, or URI scheme; opaque to the registry
    pub executable: String,
    #[serde(default)]
    pub supported_formats: Vec<String>,
    #[serde(default)]
    pub category: AppCategory,
}

impl ExternalApp {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        executable: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            executable: executable.into(),
            supported_formats: Vec::new(),
            category: AppCategory::Other,
        }
    }

    pub fn with_category(mut self, category: AppCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_formats
            .extend(formats.into_iter().map(Into::into));
        self
    }

    pub fn supports_format(&self, format: &str) -> bool {
        let wanted = normalize_format(format);
        self.supported_formats
            .iter()
            .any(|f| normalize_format(f) == wanted)
    }
}

/// Host platform identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Windows,
    Macos,
    Linux,
    #[default]
    Web,
    Other,
}

/// What the host platform lets actions do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub has_clipboard: bool,
    #[serde(default)]
    pub can_open_file_manager: bool,
    #[serde(default)]
    pub can_launch_apps: bool,
    /// URI schemes the host can open, e.g. `https`, `file`
    #[serde(default)]
    pub supported_protocols: Vec<String>,
}

impl SystemInfo {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn supports_protocol(&self, protocol: &str) -> bool {
        let wanted = protocol.trim_end_matches(':');
        self.supported_protocols
            .iter()
            .any(|p| p.trim_end_matches(':').eq_ignore_ascii_case(wanted))
    }
}

/// Snapshot of everything actions are matched against
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoContext {
    pub file_location: FileLocation,
    pub file_type: FileType,
    #[serde(default)]
    pub capabilities: Capabilities,
    #[serde(default)]
    pub available_apps: Vec<ExternalApp>,
    #[serde(default)]
    pub system_info: SystemInfo,
}

impl PhotoContext {
    pub fn new(file_location: FileLocation, file_type: FileType) -> Self {
        Self {
            file_location,
            file_type,
            ..Self::default()
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_app(mut self, app: ExternalApp) -> Self {
        self.available_apps.push(app);
        self
    }

    pub fn with_system_info(mut self, system_info: SystemInfo) -> Self {
        self.system_info = system_info;
        self
    }

    pub fn app(&self, app_id: &str) -> Option<&ExternalApp> {
        self.available_apps.iter().find(|app| app.id == app_id)
    }
}
