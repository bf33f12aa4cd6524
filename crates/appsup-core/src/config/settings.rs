//! Directory names read from the optional config file

use std::path::{Component, Path};

use appsup_fs::ConfigStore;
use serde::Deserialize;

use crate::sync::Transcript;
use crate::{Error, Result};

/// Config key naming the directory created under `Application Support`
pub const APP_SUPPORT_DIR_KEY: &str = "Application Support Subdirectory";
/// Config key naming the projects directory inside it
pub const PROJECTS_DIR_KEY: &str = "Projects Subdirectory";

const DEFAULT_APP_SUPPORT_DIR_NAME: &str = "automator_util";
const DEFAULT_PROJECTS_DIR_NAME: &str = "proj";

/// The config file as written on disk. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(rename = "Application Support Subdirectory", default)]
    app_support_dir_name: Option<String>,
    #[serde(rename = "Projects Subdirectory", default)]
    projects_dir_name: Option<String>,
}

/// Names of the directories the installer manages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    pub app_support_dir_name: String,
    pub projects_dir_name: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            app_support_dir_name: DEFAULT_APP_SUPPORT_DIR_NAME.to_string(),
            projects_dir_name: DEFAULT_PROJECTS_DIR_NAME.to_string(),
        }
    }
}

impl InstallConfig {
    /// Load the config at `path`, falling back to defaults when it is absent.
    ///
    /// Missing, `null` or empty values keep their defaults. A
    /// `loading config file:` line is written when the file is read.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if a configured name is not a single path segment.
    pub fn load(path: &Path, transcript: &mut dyn Transcript) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        transcript.progress(&format!("loading config file: {}", path.display()));
        let file: ConfigFile = ConfigStore::new().load(path)?;
        let config = Self::from_file(file);
        config.validate()?;
        Ok(config)
    }

    fn from_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            app_support_dir_name: non_empty(file.app_support_dir_name)
                .unwrap_or(defaults.app_support_dir_name),
            projects_dir_name: non_empty(file.projects_dir_name)
                .unwrap_or(defaults.projects_dir_name),
        }
    }

    /// Check that both names are plain directory names.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            (APP_SUPPORT_DIR_KEY, &self.app_support_dir_name),
            (PROJECTS_DIR_KEY, &self.projects_dir_name),
        ] {
            check_segment(value).map_err(|reason| Error::InvalidConfig {
                key: key.to_string(),
                value: value.clone(),
                reason: reason.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Validate that `name` is exactly one normal path component.
///
/// Returns the reason it is not.
pub fn check_segment(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("must not be empty");
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        (Some(Component::Normal(_)), _) => Err("must not contain a path separator"),
        (Some(Component::ParentDir), _) | (Some(Component::CurDir), _) => {
            Err("must not be a relative reference")
        }
        _ => Err("must not be an absolute path"),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
