//! Core layer for appsup
//!
//! This crate provides the reconciliation engine and the orchestration built
//! on it:
//!
//! - **Reconciler**: makes a destination tree reflect a source tree by
//!   linking or copying, refreshing changed files, replacing stale links and
//!   deleting orphans
//! - **Configuration**: directory names from `config.json` and the paths they
//!   resolve to
//! - **Installer / Uninstaller**: the application support and project
//!   install flows
//!
//! # Architecture
//!
//! ```text
//!     appsup-cli
//!         |
//!    appsup-core
//!         |
//!     appsup-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use appsup_core::{MemoryTranscript, Reconciler, SyncOptions};
//! use std::path::Path;
//!
//! let mut transcript = MemoryTranscript::new();
//! let mut reconciler = Reconciler::new(SyncOptions::link(), &mut transcript);
//! let ok = reconciler.sync(Path::new("/src/tools"), Path::new("/dst/tools"), true);
//! assert!(ok);
//! ```

pub mod config;
pub mod error;
pub mod install;
pub mod sync;
pub mod uninstall;

pub use config::{InstallConfig, InstallPaths, default_base_dir, default_config_path};
pub use error::{Error, Result};
pub use install::Installer;
pub use sync::{MemoryTranscript, Reconciler, StreamTranscript, SyncOptions, Transcript};
pub use uninstall::Uninstaller;
