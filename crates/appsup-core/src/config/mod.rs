//! Install configuration
//!
//! The only configurable values are the names of the two directories the
//! installer manages:
//!
//! 1. **Application support directory** - created under
//!    `~/Library/Application Support` (default `automator_util`)
//! 2. **Projects directory** - created inside it (default `proj`)
//!
//! Both are read from an optional `config.json` (or `.toml`) file:
//!
//! ```json
//! {
//!     "Application Support Subdirectory": "automator_util",
//!     "Projects Subdirectory": "proj"
//! }
//! ```

mod paths;
mod settings;

pub use paths::{InstallPaths, default_base_dir, default_config_path};
pub use settings::{APP_SUPPORT_DIR_KEY, InstallConfig, PROJECTS_DIR_KEY, check_segment};
