//! Run context for the reconciler

use std::path::{Path, PathBuf};

/// Options fixed for the duration of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Copy sources into place instead of linking to them.
    ///
    /// Also forces any existing destination symlink to be replaced by a copy.
    pub copy_mode: bool,
    /// Reference point for relative links.
    ///
    /// When a new link and its source both lie under this absolute path, the
    /// link stores a target relative to its own directory. `None` always
    /// stores absolute targets.
    pub link_root: Option<PathBuf>,
    /// Follow each error line with the full failure detail.
    pub debug: bool,
}

impl SyncOptions {
    /// Options for link mode.
    pub fn link() -> Self {
        Self::default()
    }

    /// Options for copy mode.
    pub fn copy() -> Self {
        Self {
            copy_mode: true,
            ..Self::default()
        }
    }

    pub fn with_link_root(mut self, root: impl AsRef<Path>) -> Self {
        self.link_root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
