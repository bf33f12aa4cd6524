//! Install orchestration
//!
//! Installs the bundled source directory into the application support
//! directory and each external project into the projects directory.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::InstallPaths;
use crate::sync::{Reconciler, SyncOptions, Transcript};
use crate::{Error, Result};

/// Installs sources into the managed directories
#[derive(Debug, Clone)]
pub struct Installer {
    source: PathBuf,
    paths: InstallPaths,
    projects: Vec<PathBuf>,
    options: SyncOptions,
}

impl Installer {
    /// Create an installer for the bundled `source` directory.
    pub fn new(source: impl Into<PathBuf>, paths: InstallPaths, options: SyncOptions) -> Self {
        Self {
            source: source.into(),
            paths,
            projects: Vec::new(),
            options,
        }
    }

    /// Add external project directories to install under the projects directory.
    pub fn with_projects(mut self, projects: impl IntoIterator<Item = PathBuf>) -> Self {
        self.projects.extend(projects);
        self
    }

    /// Run the install.
    ///
    /// Both the application support contents and every project are synced
    /// with orphan deletion enabled. The projects directory itself is never
    /// treated as an orphan of the application support directory.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if every entry succeeded, `Ok(false)` if any entry failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or the
    /// application support directory cannot be created.
    pub fn run(&self, transcript: &mut dyn Transcript) -> Result<bool> {
        let source = appsup_fs::absolute(&self.source)?;
        if !source.is_dir() {
            return Err(Error::SourceNotFound { path: source });
        }

        let mut reconciler = Reconciler::new(self.options.clone(), transcript);
        reconciler
            .ensure_directory(&self.paths.app_support_dir)
            .map_err(|source| Error::Setup {
                path: self.paths.app_support_dir.clone(),
                source,
            })?;

        let preserve: BTreeSet<OsString> = self
            .paths
            .projects_dir_name()
            .map(OsString::from)
            .into_iter()
            .collect();
        let mut success =
            reconciler.sync_preserving(&source, &self.paths.app_support_dir, true, &preserve);
        tracing::info!(success, source = %source.display(), "Synced application support");

        for project in &self.projects {
            success = install_project(&mut reconciler, project, &self.paths) && success;
        }

        tracing::info!(success, projects = self.projects.len(), "Install finished");
        Ok(success)
    }
}

fn install_project(reconciler: &mut Reconciler<'_>, project: &Path, paths: &InstallPaths) -> bool {
    let project = match appsup_fs::absolute(project) {
        Ok(project) => project,
        Err(err) => return reconciler.record_failure(&err),
    };
    let Some(name) = project.file_name() else {
        return reconciler.record_failure(&Error::InvalidProject {
            name: project.display().to_string(),
            reason: "path has no final component".to_string(),
        });
    };
    if !project.exists() {
        return reconciler.record_failure(&Error::InvalidProject {
            name: project.display().to_string(),
            reason: "path does not exist".to_string(),
        });
    }

    let ok = reconciler.sync(&project, &paths.projects_dir.join(name), true);
    tracing::info!(success = ok, project = %project.display(), "Synced project");
    ok
}
