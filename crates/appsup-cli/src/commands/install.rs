//! Install command implementation

use std::path::PathBuf;

use appsup_core::{Installer, SyncOptions, Transcript};

use super::Resolved;
use crate::cli::Locations;
use crate::error::Result;

/// Run the install command.
///
/// Links are relative when both ends lie under the home directory.
pub fn run_install(
    locations: &Locations,
    copy: bool,
    projects: &[PathBuf],
    debug: bool,
    transcript: &mut dyn Transcript,
) -> Result<bool> {
    let resolved = Resolved::from_locations(locations, transcript)?;

    let mut options = if copy {
        SyncOptions::copy()
    } else {
        SyncOptions::link()
    }
    .with_debug(debug);
    match appsup_fs::path::home_dir() {
        Ok(home) => options = options.with_link_root(home),
        Err(err) => tracing::warn!(%err, "Links will use absolute targets"),
    }

    let installer = Installer::new(resolved.source, resolved.paths, options)
        .with_projects(projects.iter().cloned());
    Ok(installer.run(transcript)?)
}
