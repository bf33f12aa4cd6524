//! Well-known names used when locating installer inputs and outputs.

use std::path::Path;

/// Fixed path segments the installer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportPath {
    /// The `Library` directory under the home directory
    Library,
    /// The `Application Support` directory under `Library`
    ApplicationSupport,
    /// The bundled source directory shipped next to the installer
    SourceDir,
    /// The optional config file beside the source directory
    ConfigFile,
}

impl SupportPath {
    /// Get the string representation of the path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Library => "Library",
            Self::ApplicationSupport => "Application Support",
            Self::SourceDir => "app_support",
            Self::ConfigFile => "config.json",
        }
    }
}

impl AsRef<Path> for SupportPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for SupportPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for SupportPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
