//! Primitive filesystem operations used by the reconciler
//!
//! Every function reports failures as [`Error::Io`] carrying the path the
//! failing call was made on, or as [`Error::Copy`] naming both ends of a copy.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Size and modification time of a file, following symbolic links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStamp {
    pub len: u64,
    pub modified: SystemTime,
}

impl FileStamp {
    pub fn of(path: &Path) -> Result<Self> {
        let meta = fs::metadata(path).map_err(|e| Error::io(path, e))?;
        let modified = meta.modified().map_err(|e| Error::io(path, e))?;
        Ok(Self {
            len: meta.len(),
            modified,
        })
    }

    /// Whether a destination with this stamp must be refreshed from `source`.
    ///
    /// True when the sizes differ or the source is strictly newer.
    pub fn is_stale_against(&self, source: &FileStamp) -> bool {
        self.len != source.len || source.modified > self.modified
    }
}

/// Create `path` and any missing ancestors.
pub fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Names of the immediate children of a directory.
pub fn child_names(dir: &Path) -> Result<BTreeSet<OsString>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        names.insert(entry.file_name());
    }
    Ok(names)
}

/// Copy a file's contents and permissions, then carry over its access and
/// modification times.
///
/// Preserving the modification time keeps a later freshness check from
/// treating the copy as stale.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).map_err(|source| Error::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    copy_times(src, dst)
}

/// Copy a directory tree, following symbolic links inside the source.
///
/// `dst` must not exist. Files are copied with [`copy_file`]. Directory
/// permissions and times are applied deepest first, after all contents are
/// in place, so a read-only source directory still receives its children.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(Error::io(
            dst,
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        ));
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::Walk {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target).map_err(|e| Error::io(&target, e))?;
            let perms = entry.metadata()?.permissions();
            dirs.push((entry.path().to_path_buf(), target, perms));
        } else {
            copy_file(entry.path(), &target)?;
        }
    }

    for (source_dir, target_dir, perms) in dirs.into_iter().rev() {
        copy_times(&source_dir, &target_dir)?;
        fs::set_permissions(&target_dir, perms).map_err(|e| Error::io(&target_dir, e))?;
    }
    Ok(())
}

/// Remove a file or a symbolic link (the link itself, never its target).
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

/// Remove a directory and everything beneath it.
pub fn remove_tree(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Create a symbolic link at `link` whose stored target is `target`.
///
/// `target_is_dir` selects the link flavor on Windows; it is ignored on Unix.
#[cfg(unix)]
pub fn create_symlink(target: &Path, link: &Path, _target_is_dir: bool) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::io(link, e))
}

#[cfg(windows)]
pub fn create_symlink(target: &Path, link: &Path, target_is_dir: bool) -> Result<()> {
    let result = if target_is_dir {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };
    result.map_err(|e| Error::io(link, e))
}

fn copy_times(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(|e| Error::io(src, e))?;
    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(dst, atime, mtime).map_err(|e| Error::io(dst, e))
}
