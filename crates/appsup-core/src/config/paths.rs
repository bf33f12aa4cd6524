//! Resolution of the managed directories from config names

use std::path::{Path, PathBuf};

use appsup_fs::SupportPath;

use super::settings::InstallConfig;
use crate::Result;

/// Absolute locations the installer manages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    /// `<base>/<app support name>`, the destination root
    pub app_support_dir: PathBuf,
    /// `<app support dir>/<projects name>`, where projects are installed
    pub projects_dir: PathBuf,
}

impl InstallPaths {
    /// Resolve the managed directories under `base_dir`.
    pub fn resolve(config: &InstallConfig, base_dir: &Path) -> Result<Self> {
        let base_dir = appsup_fs::absolute(base_dir)?;
        let app_support_dir = base_dir.join(&config.app_support_dir_name);
        let projects_dir = app_support_dir.join(&config.projects_dir_name);
        Ok(Self {
            app_support_dir,
            projects_dir,
        })
    }

    /// Name of the projects directory inside the application support directory.
    pub fn projects_dir_name(&self) -> Option<&std::ffi::OsStr> {
        self.projects_dir.file_name()
    }
}

/// `$HOME/Library/Application Support`
pub fn default_base_dir() -> Result<PathBuf> {
    Ok(appsup_fs::path::home_dir()?
        .join(SupportPath::Library)
        .join(SupportPath::ApplicationSupport))
}

/// `config.json` beside the bundled source directory.
pub fn default_config_path(source_dir: &Path) -> PathBuf {
    source_dir
        .parent()
        .unwrap_or(source_dir)
        .join(SupportPath::ConfigFile)
}
