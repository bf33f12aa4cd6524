//! Uninstall orchestration

use std::fs;

use crate::config::{InstallPaths, check_segment};
use crate::sync::{Reconciler, SyncOptions, Transcript};
use crate::{Error, Result};

/// Removes installed entries from the managed directories
#[derive(Debug, Clone)]
pub struct Uninstaller {
    paths: InstallPaths,
    projects: Vec<String>,
    debug: bool,
}

impl Uninstaller {
    pub fn new(paths: InstallPaths) -> Self {
        Self {
            paths,
            projects: Vec::new(),
            debug: false,
        }
    }

    /// Restrict the uninstall to these installed project names.
    pub fn with_projects(mut self, projects: impl IntoIterator<Item = String>) -> Self {
        self.projects.extend(projects);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Run the uninstall.
    ///
    /// Without project names the whole application support directory is
    /// removed. With names only `projects_dir/<name>` entries are removed;
    /// names that are not installed are noted and skipped.
    pub fn run(&self, transcript: &mut dyn Transcript) -> Result<bool> {
        let options = SyncOptions::link().with_debug(self.debug);
        let mut reconciler = Reconciler::new(options, transcript);

        if self.projects.is_empty() {
            let root = &self.paths.app_support_dir;
            if fs::symlink_metadata(root).is_err() {
                tracing::info!(path = %root.display(), "Nothing installed");
                return Ok(true);
            }
            return Ok(reconciler.delete(root));
        }

        let mut success = true;
        for name in &self.projects {
            if let Err(reason) = check_segment(name) {
                reconciler.record_failure(&Error::InvalidProject {
                    name: name.clone(),
                    reason: reason.to_string(),
                });
                success = false;
                continue;
            }

            let path = self.paths.projects_dir.join(name);
            if fs::symlink_metadata(&path).is_err() {
                reconciler
                    .transcript()
                    .progress(&format!("not installed: {}", appsup_fs::quoted(&path)));
                continue;
            }
            success = reconciler.delete(&path) && success;
        }

        tracing::info!(success, projects = self.projects.len(), "Uninstall finished");
        Ok(success)
    }
}
