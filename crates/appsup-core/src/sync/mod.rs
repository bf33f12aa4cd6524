//! Sync reconciliation
//!
//! This module provides:
//! - **Reconciler**: the recursive engine that links, copies, refreshes and
//!   deletes entries so a destination reflects a source
//! - **SyncOptions**: the run context (copy vs link, relative link root, debug)
//! - **Transcript**: the progress/error line sinks a run reports on

mod options;
mod reconciler;
mod transcript;

pub use options::SyncOptions;
pub use reconciler::Reconciler;
pub use transcript::{MemoryTranscript, StreamTranscript, Transcript};
