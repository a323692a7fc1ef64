//! Output resource files (outputs, logs, errors).
//!
//! Each enabled [`Resource`] is opened as a [`LogSink`] at the path the
//! [`Layout`] picks for writes: inside the working directory when it exists,
//! otherwise at the base path itself. Nothing is opened or created for a
//! disabled resource.
pub mod sink;

use std::path::{Path, PathBuf};

use crate::error::SettingsError;
use crate::fs;
use crate::settings::{Files, Layout, Resource};

pub use sink::LogSink;

type Result<T> = std::result::Result<T, SettingsError>;

/// The three resource slots of [`Files`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Captured stdout of watched processes.
    Outputs,
    /// General log.
    Logs,
    /// Captured stderr and reported errors.
    Errors,
}

impl Role {
    /// Every role, in a stable order.
    pub const ALL: [Self; 3] = [Self::Outputs, Self::Logs, Self::Errors];

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Outputs => "outputs",
            Self::Logs => "logs",
            Self::Errors => "errors",
        }
    }

    /// File name used when the resource is enabled without a name.
    #[must_use]
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Outputs => "outputs.log",
            Self::Logs => "logs.log",
            Self::Errors => "errors.log",
        }
    }

    /// Return the file name configured for this role in `resource`.
    #[must_use]
    pub fn file_name(self, resource: &Resource) -> &str {
        if resource.name.is_empty() {
            self.default_file_name()
        } else {
            &resource.name
        }
    }
}

/// Open sinks for the enabled resources.
#[derive(Debug, Default)]
pub struct Sinks {
    /// Sink for [`Role::Outputs`].
    pub outputs: Option<LogSink>,
    /// Sink for [`Role::Logs`].
    pub logs: Option<LogSink>,
    /// Sink for [`Role::Errors`].
    pub errors: Option<LogSink>,
}

impl Sinks {
    /// Return the sink for `role`, if it was opened.
    pub const fn get_mut(&mut self, role: Role) -> Option<&mut LogSink> {
        match role {
            Role::Outputs => self.outputs.as_mut(),
            Role::Logs => self.logs.as_mut(),
            Role::Errors => self.errors.as_mut(),
        }
    }

    /// Remove and return the sink for `role`.
    pub const fn take(&mut self, role: Role) -> Option<LogSink> {
        match role {
            Role::Outputs => self.outputs.take(),
            Role::Logs => self.logs.take(),
            Role::Errors => self.errors.take(),
        }
    }

    /// Return `(role, path)` for every open sink.
    #[must_use]
    pub fn paths(&self) -> Vec<(Role, &Path)> {
        [
            (Role::Outputs, &self.outputs),
            (Role::Logs, &self.logs),
            (Role::Errors, &self.errors),
        ]
        .into_iter()
        .filter_map(|(role, sink)| sink.as_ref().map(|s| (role, s.path())))
        .collect()
    }
}

/// Opens and purges resource files under a base path.
#[derive(Debug, Clone)]
pub struct ResourceFiles {
    layout: Layout,
}

impl ResourceFiles {
    /// Manage resource files under `base`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            layout: Layout::new(base),
        }
    }

    /// Return where the file for `role` would be opened right now.
    #[must_use]
    pub fn resolve(&self, role: Role, resource: &Resource) -> PathBuf {
        self.layout.resolve_write(role.file_name(resource))
    }

    /// Open every enabled resource in `files`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] for the first file that cannot be opened.
    pub fn open(&self, files: &Files) -> Result<Sinks> {
        let mut sinks = Sinks::default();
        for role in Role::ALL {
            let sink = self.open_role(role, files.resource(role))?;
            match role {
                Role::Outputs => sinks.outputs = sink,
                Role::Logs => sinks.logs = sink,
                Role::Errors => sinks.errors = sink,
            }
        }
        Ok(sinks)
    }

    /// Open the file for one resource, or return `None` if it is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be opened.
    pub fn open_role(&self, role: Role, resource: &Resource) -> Result<Option<LogSink>> {
        if !resource.status {
            return Ok(None);
        }
        Self::open_at(self.resolve(role, resource)).map(Some)
    }

    /// Open a sink at an already resolved `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be opened.
    pub fn open_at(path: PathBuf) -> Result<LogSink> {
        LogSink::open(&path).map_err(|source| SettingsError::Io { path, source })
    }

    /// Delete the existing file of every role at its resolved location.
    ///
    /// Returns the paths that were removed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if an existing file cannot be removed.
    pub fn purge(&self, files: &Files) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for role in Role::ALL {
            let path = self.resolve(role, files.resource(role));
            let existed = fs::remove_file_if_exists(&path).map_err(|source| SettingsError::Io {
                path: path.clone(),
                source,
            })?;
            if existed {
                tracing::debug!("purged {} file {}", role.label(), path.display());
                removed.push(path);
            }
        }
        Ok(removed)
    }
}
