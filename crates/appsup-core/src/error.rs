//! Error types for appsup-core

use std::path::PathBuf;

/// Result type for appsup-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in appsup-core operations
///
/// Only setup and configuration problems surface as `Err`. Failures of
/// individual entries during a sync are reported on the transcript and
/// folded into the run's boolean result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination root could not be created; the run cannot start
    #[error("Cannot create {path}: {source}")]
    Setup {
        path: PathBuf,
        #[source]
        source: appsup_fs::Error,
    },

    /// The bundled source directory is missing
    #[error("Source directory not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// A configured directory name is unusable
    #[error("Invalid {key} in config: {value:?} ({reason})")]
    InvalidConfig {
        key: String,
        value: String,
        reason: String,
    },

    /// A project path or name cannot be installed or removed
    #[error("Invalid project {name:?}: {reason}")]
    InvalidProject { name: String, reason: String },

    /// A source directory meets an existing non-directory destination
    #[error("Cannot merge directory into non-directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A source file meets an existing directory destination
    #[error("Cannot replace directory with file: {path}")]
    IsADirectory { path: PathBuf },

    /// Filesystem error from appsup-fs
    #[error(transparent)]
    Fs(#[from] appsup_fs::Error),
}
