//! The sync reconciliation engine
//!
//! The `Reconciler` makes a destination path reflect a source path,
//! recursively, by linking or copying missing entries, refreshing changed
//! files, replacing stale links and optionally deleting orphans.
//!
//! Every operation announces itself on the transcript before it runs. A
//! failing operation writes an `ERROR:` line, reports `false` for its entry
//! and lets the walk continue with the siblings.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use appsup_fs::{FileStamp, io, quoted};
use tracing::debug;

use super::options::SyncOptions;
use super::transcript::Transcript;
use crate::Error;

/// Reconciles source trees into destination trees.
///
/// Holds no state beyond its options and transcript; the filesystem is the
/// only record of what has been done.
pub struct Reconciler<'t> {
    options: SyncOptions,
    transcript: &'t mut dyn Transcript,
}

impl<'t> Reconciler<'t> {
    pub fn new(options: SyncOptions, transcript: &'t mut dyn Transcript) -> Self {
        Self {
            options,
            transcript,
        }
    }

    /// The transcript this reconciler reports on.
    pub fn transcript(&mut self) -> &mut dyn Transcript {
        &mut *self.transcript
    }

    /// Make `dst` reflect `src`.
    ///
    /// With `delete` set, destination entries that have no counterpart in the
    /// source are removed at every directory level below `dst`.
    ///
    /// Returns `true` only if every entry succeeded.
    pub fn sync(&mut self, src: &Path, dst: &Path, delete: bool) -> bool {
        self.reconcile(src, dst, delete, &BTreeSet::new())
    }

    /// Like [`sync`](Self::sync), but the immediate children of `dst` named
    /// in `preserve` are never treated as orphans.
    pub fn sync_preserving(
        &mut self,
        src: &Path,
        dst: &Path,
        delete: bool,
        preserve: &BTreeSet<OsString>,
    ) -> bool {
        self.reconcile(src, dst, delete, preserve)
    }

    /// Delete a file, a link or a whole directory tree.
    pub fn delete(&mut self, path: &Path) -> bool {
        let is_dir = fs::symlink_metadata(path)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if is_dir {
            self.delete_dir(path)
        } else {
            self.delete_file(path)
        }
    }

    /// Create `path` (and missing ancestors) unless it already exists.
    ///
    /// The error is returned rather than recorded so the caller decides
    /// whether it is fatal.
    pub fn ensure_directory(&mut self, path: &Path) -> appsup_fs::Result<()> {
        if path.exists() {
            return Ok(());
        }
        self.transcript
            .progress(&format!("making directory: {}", path.display()));
        io::create_dir_all(path)
    }

    /// Record a failed operation on the error channel and return `false`.
    pub fn record_failure(&mut self, err: &dyn std::error::Error) -> bool {
        self.transcript.error(&format!("ERROR: {}", err));
        if self.options.debug {
            for line in format!("{:#?}", err).lines() {
                self.transcript.error(line);
            }
        }
        false
    }

    fn reconcile(
        &mut self,
        src: &Path,
        dst: &Path,
        delete: bool,
        preserve: &BTreeSet<OsString>,
    ) -> bool {
        if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty())
            && let Err(err) = self.ensure_directory(parent)
        {
            return self.record_failure(&err);
        }

        // A replaced link is re-examined; the second pass sees no destination.
        loop {
            let dst_meta = match fs::symlink_metadata(dst) {
                Ok(meta) => meta,
                Err(err) if err.kind() == ErrorKind::NotFound => return self.create(src, dst),
                Err(err) => return self.record_failure(&appsup_fs::Error::io(dst, err)),
            };

            if dst_meta.file_type().is_symlink() {
                if !self.options.copy_mode && appsup_fs::resolves_to(dst, src) {
                    debug!(dst = %dst.display(), "Link already points at source");
                    return true;
                }
                debug!(dst = %dst.display(), "Replacing link");
                if !self.delete_file(dst) {
                    return false;
                }
                continue;
            }

            let src_is_dir = match fs::metadata(src) {
                Ok(meta) => meta.is_dir(),
                Err(err) => return self.record_failure(&appsup_fs::Error::io(src, err)),
            };

            return match (src_is_dir, dst_meta.is_dir()) {
                (true, true) => self.merge_directory(src, dst, delete, preserve),
                (false, false) => self.refresh_file(src, dst),
                (true, false) => self.record_failure(&Error::NotADirectory {
                    path: dst.to_path_buf(),
                }),
                (false, true) => self.record_failure(&Error::IsADirectory {
                    path: dst.to_path_buf(),
                }),
            };
        }
    }

    fn merge_directory(
        &mut self,
        src: &Path,
        dst: &Path,
        delete: bool,
        preserve: &BTreeSet<OsString>,
    ) -> bool {
        let src_names = match io::child_names(src) {
            Ok(names) => names,
            Err(err) => return self.record_failure(&err),
        };
        let dst_names = match io::child_names(dst) {
            Ok(names) => names,
            Err(err) => return self.record_failure(&err),
        };
        debug!(
            src = %src.display(),
            dst = %dst.display(),
            sources = src_names.len(),
            existing = dst_names.len(),
            "Merging directory"
        );

        let mut success = true;
        for name in &src_names {
            success = self.sync(&src.join(name), &dst.join(name), delete) && success;
        }

        if delete {
            for name in dst_names
                .difference(&src_names)
                .filter(|name| !preserve.contains(*name))
            {
                success = self.delete(&dst.join(name)) && success;
            }
        }
        success
    }

    fn refresh_file(&mut self, src: &Path, dst: &Path) -> bool {
        let stamps = FileStamp::of(src).and_then(|s| FileStamp::of(dst).map(|d| (s, d)));
        match stamps {
            Ok((src_stamp, dst_stamp)) if dst_stamp.is_stale_against(&src_stamp) => {
                self.delete_file(dst) && self.copy_file(src, dst)
            }
            Ok(_) => {
                debug!(dst = %dst.display(), "File up to date");
                true
            }
            Err(err) => self.record_failure(&err),
        }
    }

    fn create(&mut self, src: &Path, dst: &Path) -> bool {
        if !self.options.copy_mode {
            return self.make_symlink(dst, src);
        }
        if src.is_dir() {
            self.copy_dir(src, dst)
        } else {
            self.copy_file(src, dst)
        }
    }

    fn copy_file(&mut self, src: &Path, dst: &Path) -> bool {
        self.transcript.progress(&format!(
            "copying file {} to {}",
            quoted(src),
            quoted(dst)
        ));
        self.attempt(io::copy_file(src, dst))
    }

    fn copy_dir(&mut self, src: &Path, dst: &Path) -> bool {
        self.transcript.progress(&format!(
            "copying directory {} to {}",
            quoted(src),
            quoted(dst)
        ));
        self.attempt(io::copy_tree(src, dst))
    }

    fn delete_file(&mut self, path: &Path) -> bool {
        self.transcript
            .progress(&format!("deleting file {}", quoted(path)));
        self.attempt(io::remove_file(path))
    }

    fn delete_dir(&mut self, path: &Path) -> bool {
        self.transcript
            .progress(&format!("deleting directory {}", quoted(path)));
        self.attempt(io::remove_tree(path))
    }

    fn make_symlink(&mut self, link: &Path, src: &Path) -> bool {
        let endpoints = appsup_fs::absolute(link)
            .and_then(|link| appsup_fs::absolute(src).map(|src| (link, src)));
        let (link_abs, src_abs) = match endpoints {
            Ok(endpoints) => endpoints,
            Err(err) => return self.record_failure(&err),
        };
        let target = appsup_fs::link_target(&link_abs, &src_abs, self.options.link_root.as_deref());

        self.transcript.progress(&format!(
            "placing symbolic link at {} to {}",
            quoted(link),
            quoted(&target)
        ));
        self.attempt(io::create_symlink(&target, link, src.is_dir()))
    }

    fn attempt(&mut self, result: appsup_fs::Result<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => self.record_failure(&err),
        }
    }
}
