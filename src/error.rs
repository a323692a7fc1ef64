//! Domain-specific error types for settings and resource files.
//!
//! Library operations return [`SettingsError`]; command handlers at the CLI
//! boundary convert it to [`anyhow::Error`] via the standard `?` operator and
//! `main` hands it to the [`Escalator`](crate::escalation::Escalator), which
//! picks an action from the error's [`ErrorKind`].
//!
//! # Error taxonomy
//!
//! ```text
//! SettingsError
//! ├── NotFound         : no file at any candidate path
//! ├── Deserialize      : bytes do not match the settings schema
//! ├── Serialize        : in-memory value cannot be encoded
//! ├── Io               : read/write/open/remove failure
//! └── DirectoryCreation: working directory could not be created
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the settings store and the resource file manager.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// No file exists at the path (or at any candidate path for a read).
    #[error("file not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but its contents do not decode into the target shape.
    #[error("invalid settings in {}: {source}", .path.display())]
    Deserialize {
        /// File that failed to decode.
        path: PathBuf,
        /// Underlying decoder error.
        source: serde_yaml::Error,
    },

    /// The value could not be encoded; nothing was written.
    #[error("failed to encode settings: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A filesystem operation failed after existence checks passed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The working directory could not be created.
    ///
    /// Writers treat this as a signal to fall back to the legacy location
    /// rather than as a failure.
    #[error("cannot create working directory {}: {source}", .path.display())]
    DirectoryCreation {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Copyable discriminant of [`SettingsError`], used to key escalation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`SettingsError::NotFound`].
    NotFound,
    /// See [`SettingsError::Deserialize`].
    Deserialization,
    /// See [`SettingsError::Serialize`].
    Serialization,
    /// See [`SettingsError::Io`].
    Io,
    /// See [`SettingsError::DirectoryCreation`].
    DirectoryCreation,
}

impl SettingsError {
    /// Return the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Deserialize { .. } => ErrorKind::Deserialization,
            Self::Serialize(_) => ErrorKind::Serialization,
            Self::Io { .. } => ErrorKind::Io,
            Self::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
        }
    }

    /// Wrap an I/O error for `path`, mapping `NotFound` to [`Self::NotFound`].
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let e = SettingsError::NotFound {
            path: PathBuf::from(".realize/realize.yaml"),
        };
        insta::assert_snapshot!(e.to_string(), @"file not found: .realize/realize.yaml");
    }

    #[test]
    fn io_display_includes_path_and_source() {
        let e = SettingsError::Io {
            path: PathBuf::from("logs.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("logs.log"));
        assert!(e.to_string().contains("permission denied"));
    }

    #[test]
    fn directory_creation_has_source() {
        use std::error::Error as StdError;
        let e = SettingsError::DirectoryCreation {
            path: PathBuf::from(".realize"),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "file exists"),
        };
        assert!(e.source().is_some());
        assert_eq!(e.kind(), ErrorKind::DirectoryCreation);
    }

    #[test]
    fn io_helper_maps_missing_files_to_not_found() {
        let e = SettingsError::io("x", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(e.kind(), ErrorKind::NotFound);

        let e = SettingsError::io("x", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(e.kind(), ErrorKind::Io);
    }

    #[test]
    fn deserialize_kind() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("flimit: [unclosed").unwrap_err();
        let e = SettingsError::Deserialize {
            path: PathBuf::from("realize.yaml"),
            source,
        };
        assert_eq!(e.kind(), ErrorKind::Deserialization);
        assert!(e.to_string().starts_with("invalid settings in realize.yaml"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn settings_error_is_send_sync() {
        assert_send_sync::<SettingsError>();
    }

    #[test]
    fn settings_error_converts_to_anyhow() {
        let e = SettingsError::NotFound {
            path: PathBuf::from("realize.yaml"),
        };
        let any: anyhow::Error = e.into();
        assert!(any.downcast_ref::<SettingsError>().is_some());
    }
}
