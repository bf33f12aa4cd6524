//! Paths command implementation

use appsup_core::Transcript;

use super::Resolved;
use crate::cli::Locations;
use crate::error::Result;

/// Print where the installer reads from and writes to.
pub fn run_paths(locations: &Locations, transcript: &mut dyn Transcript) -> Result<bool> {
    let resolved = Resolved::from_locations(locations, transcript)?;
    for (label, path) in [
        ("source", &resolved.source),
        ("config", &resolved.config_path),
        ("application support", &resolved.paths.app_support_dir),
        ("projects", &resolved.paths.projects_dir),
    ] {
        transcript.progress(&format!("{}: {}", label, path.display()));
    }
    Ok(true)
}
