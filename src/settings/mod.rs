//! Persisted settings document and its storage.
//!
//! - [`Settings`] and friends describe what is written to `realize.yaml`
//! - [`layout`] decides where a file lives (working directory or legacy path)
//! - [`store`] reads and records the document through the layout
pub mod duration;
pub mod layout;
pub mod store;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::resources::Role;

pub use layout::{Convention, Layout};
pub use store::{Recorded, SettingsStore};

/// Name of the private working directory at the invocation root.
pub const WORK_DIR: &str = ".realize";

/// Default settings file name.
pub const SETTINGS_FILE: &str = "realize.yaml";

/// Root settings document.
///
/// `file` names the document on disk and is never serialized; the store
/// preserves it across reads.
///
/// # Examples
///
/// ```
/// use realize_cli::settings::Settings;
///
/// let settings = Settings { file_limit: 10, recovery: true, ..Settings::default() };
/// let text = serde_yaml::to_string(&settings).unwrap();
/// let back: Settings = serde_yaml::from_str(&text).unwrap();
/// assert_eq!(back.file_limit, 10);
/// assert!(back.recovery);
/// assert!(!back.legacy.force);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical file name of the document (not persisted).
    #[serde(skip)]
    pub file: String,
    /// Generated resource files.
    #[serde(skip_serializing_if = "Files::is_empty")]
    pub files: Files,
    /// Polling override.
    pub legacy: Legacy,
    /// Maximum number of files the watcher may track (`0` means unlimited).
    #[serde(rename = "flimit", skip_serializing_if = "is_zero")]
    pub file_limit: i32,
    /// Restart watched processes after a crash.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub recovery: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::named(SETTINGS_FILE)
    }
}

impl Settings {
    /// Create default settings stored under `file`.
    #[must_use]
    pub fn named(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            file_limit: 0,
            recovery: false,
            files: Files::default(),
            legacy: Legacy::default(),
        }
    }
}

/// Forces polling instead of native change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Legacy {
    /// Use polling.
    pub force: bool,
    /// Delay between polls.
    #[serde(with = "duration")]
    pub interval: Duration,
}

/// Files generated alongside the settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Files {
    /// Purge generated files before opening them again.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub clean: bool,
    /// Captured stdout of watched processes.
    #[serde(skip_serializing_if = "Resource::is_empty")]
    pub outputs: Resource,
    /// General log.
    #[serde(skip_serializing_if = "Resource::is_empty")]
    pub logs: Resource,
    /// Captured stderr and reported errors.
    #[serde(skip_serializing_if = "Resource::is_empty")]
    pub errors: Resource,
}

impl Files {
    /// Return `true` if every field has its zero value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Return the resource configured for `role`.
    #[must_use]
    pub const fn resource(&self, role: Role) -> &Resource {
        match role {
            Role::Outputs => &self.outputs,
            Role::Logs => &self.logs,
            Role::Errors => &self.errors,
        }
    }

    /// Return a mutable reference to the resource configured for `role`.
    pub const fn resource_mut(&mut self, role: Role) -> &mut Resource {
        match role {
            Role::Outputs => &mut self.outputs,
            Role::Logs => &mut self.logs,
            Role::Errors => &mut self.errors,
        }
    }
}

/// A toggleable output file. `name` is only consulted when `status` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Whether the file is written.
    pub status: bool,
    /// File name, resolved against the working directory convention.
    pub name: String,
}

impl Resource {
    /// Create an enabled resource writing to `name`.
    #[must_use]
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            status: true,
            name: name.into(),
        }
    }

    /// Return `true` if the resource is disabled and unnamed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.status && self.name.is_empty()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde passes fields by reference
const fn is_zero(value: &i32) -> bool {
    *value == 0
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_only_write_legacy() {
        let text = serde_yaml::to_string(&Settings::default()).unwrap();
        assert_eq!(text, "legacy:\n  force: false\n  interval: 0s\n");
    }

    #[test]
    fn file_name_is_not_serialized() {
        let text = serde_yaml::to_string(&Settings::named("custom.yaml")).unwrap();
        assert!(!text.contains("custom.yaml"));
    }

    #[test]
    fn populated_fields_round_trip() {
        let mut settings = Settings {
            file_limit: 10,
            recovery: true,
            ..Settings::default()
        };
        settings.files.clean = true;
        settings.files.logs = Resource::enabled("logs.log");
        settings.legacy = Legacy {
            force: true,
            interval: Duration::from_micros(1500),
        };

        let text = serde_yaml::to_string(&settings).unwrap();
        let mut back: Settings = serde_yaml::from_str(&text).unwrap();
        back.file.clone_from(&settings.file);
        assert_eq!(back, settings);
    }

    #[test]
    fn omitted_fields_decode_to_zero_values() {
        let back: Settings = serde_yaml::from_str("flimit: 10\nrecovery: true\n").unwrap();
        assert_eq!(back.file_limit, 10);
        assert!(back.recovery);
        assert!(!back.legacy.force);
        assert_eq!(back.legacy.interval, Duration::ZERO);
        assert!(back.files.is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let back: Settings =
            serde_yaml::from_str("schema: []\nlegacy:\n  force: true\n").unwrap();
        assert!(back.legacy.force);
    }

    #[test]
    fn reads_documents_written_by_earlier_releases() {
        let text = "legacy:\n  force: true\n  interval: 100ms\nflimit: 10\n";
        let back: Settings = serde_yaml::from_str(text).unwrap();
        assert!(back.legacy.force);
        assert_eq!(back.legacy.interval, Duration::from_millis(100));
        assert_eq!(back.file_limit, 10);
    }

    #[test]
    fn disabled_resources_are_omitted() {
        let mut settings = Settings::default();
        settings.files.errors = Resource::enabled("errors.log");
        let text = serde_yaml::to_string(&settings).unwrap();
        assert!(text.contains("  errors:\n    status: true\n    name: errors.log\n"), "{text}");
        assert!(!text.contains("outputs:"), "{text}");
        assert!(!text.contains("logs:"), "{text}");
    }

    #[test]
    fn resource_accessors_follow_role() {
        let mut files = Files::default();
        *files.resource_mut(Role::Outputs) = Resource::enabled("out.log");
        assert_eq!(files.resource(Role::Outputs).name, "out.log");
        assert!(files.resource(Role::Logs).is_empty());
    }
}
