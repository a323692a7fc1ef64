//! Reading and recording the settings document.
use std::path::{Path, PathBuf};

use serde::de::{DeserializeOwned, Error as _};

use super::layout::{Convention, Layout};
use super::Settings;
use crate::error::SettingsError;
use crate::fs;

type Result<T> = std::result::Result<T, SettingsError>;

/// Where a [`SettingsStore::record`] call wrote the document.
#[derive(Debug)]
pub struct Recorded {
    /// File that was written.
    pub path: PathBuf,
    /// Convention the path follows.
    pub convention: Convention,
    /// Why the working directory was skipped, if it was.
    pub fallback: Option<SettingsError>,
}

/// Loads and persists [`Settings`] through a [`Layout`].
#[derive(Debug, Clone)]
pub struct SettingsStore {
    layout: Layout,
}

impl SettingsStore {
    /// Create a store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_layout(Layout::new(root))
    }

    /// Create a store over an existing layout.
    #[must_use]
    pub const fn with_layout(layout: Layout) -> Self {
        Self { layout }
    }

    /// Return the layout used for path resolution.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Populate `out` from the file named by `out.file`.
    ///
    /// The namespaced copy is preferred; the legacy copy at the root is read
    /// when no namespaced copy exists. `out` is left untouched on failure and
    /// its `file` is kept on success. Returns the path that was read.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::NotFound`] if neither candidate exists
    /// - [`SettingsError::Deserialize`] if the contents do not decode
    /// - [`SettingsError::Io`] if the file cannot be read
    pub fn read(&self, out: &mut Settings) -> Result<PathBuf> {
        let path = self.resolve(&out.file)?;
        let mut decoded: Settings = Self::read_from(&path)?;
        decoded.file = std::mem::take(&mut out.file);
        *out = decoded;
        Ok(path)
    }

    /// Decode the file `name` into any deserializable shape.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_as<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        Self::read_from(&self.resolve(name)?)
    }

    /// Decode the file at an already resolved `path`.
    ///
    /// An empty document decodes like an empty mapping.
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    pub fn read_from<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let bytes = stream(path)?;
        let deserialize_err = |source| SettingsError::Deserialize {
            path: path.to_path_buf(),
            source,
        };
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| deserialize_err(serde_yaml::Error::custom(e)))?;
        let text = if text.trim().is_empty() { "{}" } else { text };
        serde_yaml::from_str(text).map_err(deserialize_err)
    }

    /// Persist `settings` under `settings.file`.
    ///
    /// The document is encoded before anything touches the disk. The working
    /// directory is created if missing; when that fails the document is
    /// written to the legacy path instead, a warning is logged, and the
    /// reason is returned in [`Recorded::fallback`].
    ///
    /// # Errors
    ///
    /// - [`SettingsError::Serialize`] if the value cannot be encoded
    /// - [`SettingsError::Io`] if the final write fails
    pub fn record(&self, settings: &Settings) -> Result<Recorded> {
        let data = serde_yaml::to_string(settings)?;

        let (convention, fallback) = match self.ensure_work_dir() {
            Ok(_) => (Convention::Namespaced, None),
            Err(err) => {
                tracing::warn!("{err}; writing {} at the project root", settings.file);
                (Convention::Legacy, Some(err))
            }
        };

        let path = convention.path(&self.layout, Path::new(&settings.file));
        Self::write_to(&path, data.as_bytes())?;
        tracing::debug!("recorded settings to {}", path.display());
        Ok(Recorded {
            path,
            convention,
            fallback,
        })
    }

    /// Write `data` to an already resolved `path`, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the file cannot be written.
    pub fn write_to(path: &Path, data: &[u8]) -> Result<()> {
        fs::write_file(path, data).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Create the working directory (one level) if it is not already present.
    ///
    /// Returns `true` if the directory was created by this call.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::DirectoryCreation`] if it cannot be created.
    pub fn ensure_work_dir(&self) -> Result<bool> {
        if self.layout.has_work_dir() {
            return Ok(false);
        }
        let dir = self.layout.work_dir();
        fs::create_dir(&dir)
            .map_err(|source| SettingsError::DirectoryCreation { path: dir, source })?;
        Ok(true)
    }

    /// Remove the working directory and everything under it.
    ///
    /// Returns `false` when there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Io`] if the directory exists but cannot be removed.
    pub fn delete_work_dir(&self) -> Result<bool> {
        let dir = self.layout.work_dir();
        fs::remove_dir_tree(&dir).map_err(|source| SettingsError::Io { path: dir, source })
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        self.layout
            .resolve_read(name)
            .ok_or_else(|| SettingsError::NotFound {
                path: self.layout.root().join(name),
            })
    }
}

/// Read the raw bytes of `path` after checking that it exists.
///
/// # Errors
///
/// Returns [`SettingsError::NotFound`] if nothing exists at `path`, or
/// [`SettingsError::Io`] if the existence check or the read fails.
pub fn stream(path: &Path) -> Result<Vec<u8>> {
    path.metadata()
        .map_err(|source| SettingsError::io(path, source))?;
    std::fs::read(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}
