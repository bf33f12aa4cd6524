//! Error types for appsup-fs

use std::path::PathBuf;

/// Result type for appsup-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in appsup-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{source}: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}: copying {from} to {to}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Could not determine the home directory")]
    HomeNotFound,

    #[error("Walking {path} failed: {message}")]
    Walk { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path this error refers to, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::ConfigParse { path, .. } | Self::Walk { path, .. } => {
                Some(path)
            }
            Self::Copy { to, .. } => Some(to),
            Self::UnsupportedFormat { .. } | Self::HomeNotFound => None,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_default();
        match err.into_io_error() {
            Some(source) => Self::Io { path, source },
            None => Self::Walk {
                path,
                message: "filesystem loop detected".to_string(),
            },
        }
    }
}
