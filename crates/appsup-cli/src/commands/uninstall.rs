//! Uninstall command implementation

use appsup_core::{Transcript, Uninstaller};

use super::Resolved;
use crate::cli::Locations;
use crate::error::Result;

/// Run the uninstall command.
pub fn run_uninstall(
    locations: &Locations,
    projects: &[String],
    debug: bool,
    transcript: &mut dyn Transcript,
) -> Result<bool> {
    let resolved = Resolved::from_locations(locations, transcript)?;
    let uninstaller = Uninstaller::new(resolved.paths)
        .with_projects(projects.iter().cloned())
        .with_debug(debug);
    Ok(uninstaller.run(transcript)?)
}
