// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project root so each integration
// test can lay out settings and resource files in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use realize_cli::resources::ResourceFiles;
use realize_cli::settings::{SETTINGS_FILE, SettingsStore, WORK_DIR};

/// An isolated project root backed by a [`tempfile::TempDir`].
pub struct Project {
    /// Temporary directory acting as the project root.
    pub root: tempfile::TempDir,
}

impl Project {
    /// Create an empty project with no working directory.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the project root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the working directory (which may not exist).
    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join(WORK_DIR)
    }

    /// Settings file inside the working directory.
    pub fn namespaced(&self) -> PathBuf {
        self.work_dir().join(SETTINGS_FILE)
    }

    /// Settings file at the project root.
    pub fn legacy(&self) -> PathBuf {
        self.root.path().join(SETTINGS_FILE)
    }

    /// Create the working directory.
    pub fn with_work_dir(self) -> Self {
        std::fs::create_dir(self.work_dir()).expect("create working dir");
        self
    }

    /// Write `content` to the namespaced settings file, creating the
    /// working directory if needed.
    pub fn with_namespaced(self, content: &str) -> Self {
        std::fs::create_dir_all(self.work_dir()).expect("create working dir");
        std::fs::write(self.namespaced(), content).expect("write namespaced settings");
        self
    }

    /// Write `content` to the legacy settings file.
    pub fn with_legacy(self, content: &str) -> Self {
        std::fs::write(self.legacy(), content).expect("write legacy settings");
        self
    }

    /// Store rooted at this project.
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(self.path())
    }

    /// Resource file manager rooted at this project.
    pub fn resources(&self) -> ResourceFiles {
        ResourceFiles::new(self.path())
    }

    /// Read a file relative to the project root.
    pub fn read(&self, relative: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.path().join(relative)).expect("read project file")
    }
}
