//! Filesystem layer for appsup
//!
//! Provides the primitive operations the reconciler is built from, path
//! helpers for link targets and display, and config file loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::SupportPath;
pub use error::{Error, Result};
pub use io::FileStamp;
pub use path::{absolute, link_target, quoted, relative_to, resolves_to};
