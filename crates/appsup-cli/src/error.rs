//! Error types for appsup-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end a run before or instead of any per-entry work
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from appsup-core
    #[error(transparent)]
    Core(#[from] appsup_core::Error),

    /// Error from appsup-fs
    #[error(transparent)]
    Fs(#[from] appsup_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
