//! Command implementations for appsup-cli

pub mod install;
pub mod paths;
pub mod uninstall;

pub use install::run_install;
pub use paths::run_paths;
pub use uninstall::run_uninstall;

use std::path::PathBuf;

use appsup_core::{InstallConfig, InstallPaths, Transcript, default_base_dir, default_config_path};
use appsup_fs::SupportPath;

use crate::cli::Locations;
use crate::error::{CliError, Result};

/// Source, config and install locations after applying defaults
#[derive(Debug, Clone)]
pub struct Resolved {
    pub source: PathBuf,
    pub config_path: PathBuf,
    pub config: InstallConfig,
    pub paths: InstallPaths,
}

impl Resolved {
    /// Apply defaults to `locations` and load the config file.
    ///
    /// An explicitly named config file must exist; the default one is
    /// optional.
    pub fn from_locations(locations: &Locations, transcript: &mut dyn Transcript) -> Result<Self> {
        let source = match &locations.source {
            Some(source) => appsup_fs::absolute(source)?,
            None => default_source()?,
        };

        let config_path = match &locations.config {
            Some(path) => {
                let path = appsup_fs::absolute(path)?;
                if !path.is_file() {
                    return Err(CliError::user(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                path
            }
            None => default_config_path(&source),
        };
        let config = InstallConfig::load(&config_path, transcript)?;

        let base_dir = match &locations.base_dir {
            Some(dir) => dir.clone(),
            None => default_base_dir()?,
        };
        let paths = InstallPaths::resolve(&config, &base_dir)?;

        tracing::debug!(
            source = %source.display(),
            config = %config_path.display(),
            app_support = %paths.app_support_dir.display(),
            "Resolved locations"
        );
        Ok(Self {
            source,
            config_path,
            config,
            paths,
        })
    }
}

/// `app_support` beside the running executable.
fn default_source() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| CliError::user("Cannot locate the executable's directory"))?;
    Ok(dir.join(SupportPath::SourceDir))
}
